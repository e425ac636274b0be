pub mod config;
pub mod glyph;
pub mod layout;
mod lock;
mod logging;
pub mod render;
pub mod run_loop;
pub mod signal;
pub mod surface;
pub mod terminal_restore;

pub(crate) use lock::lock_or_recover;
pub use logging::{init_logging, log_file_path, log_panic};
