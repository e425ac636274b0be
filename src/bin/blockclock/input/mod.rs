mod event;
mod spawn;

pub(crate) use event::{classify, InputEvent};
pub(crate) use spawn::spawn_input_thread;
