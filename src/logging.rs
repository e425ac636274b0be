use std::env;
use std::fs::OpenOptions;
use std::panic;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_subscriber::fmt::time::UtcTime;

use crate::config::AppConfig;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// JSON trace file; the terminal itself is busy showing the clock.
pub fn log_file_path() -> PathBuf {
    env::var("BLOCKCLOCK_TRACE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("blockclock_trace.jsonl"))
}

/// Configure logging based on CLI flags or environment. Safe to call twice.
pub fn init_logging(config: &AppConfig) {
    if !config.logging_enabled() {
        return;
    }

    let _ = TRACING_INIT.get_or_init(|| {
        let path = log_file_path();
        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => file,
            Err(_) => return,
        };
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(file)
            .with_max_level(tracing::Level::DEBUG)
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "=== blockclock started ===");
    });
}

/// Record a panic with its location before the terminal hook re-raises it.
pub fn log_panic(info: &panic::PanicHookInfo<'_>) {
    let location = info
        .location()
        .map(|loc| format!("{}:{}", loc.file(), loc.line()))
        .unwrap_or_else(|| "unknown".to_string());
    let payload = if let Some(text) = info.payload().downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = info.payload().downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    };
    tracing::error!(%location, %payload, "panic");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn default_trace_path_lives_in_temp_dir() {
        if env::var("BLOCKCLOCK_TRACE_LOG").is_err() {
            assert_eq!(log_file_path(), env::temp_dir().join("blockclock_trace.jsonl"));
        }
    }

    #[test]
    fn no_logs_skips_subscriber_setup() {
        let config = AppConfig::parse_from(["blockclock", "--logs", "--no-logs"]);
        init_logging(&config);
        assert!(TRACING_INIT.get().is_none());
    }
}
