//! Command-line parsing and validation helpers.

mod duration;
mod validation;

use std::time::Duration;

use clap::Parser;
use ratatui::style::Color;
use thiserror::Error;

pub use duration::parse_duration;
pub use validation::parse_clock_time;

pub const DEFAULT_COLOR: &str = "blue";

/// CLI options for blockclock. `resolve` turns them into [`RenderOptions`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "blockclock",
    about = "Blockclock: full-screen countdown, stopwatch and clock",
    author,
    version
)]
pub struct AppConfig {
    /// Show seconds
    #[arg(short = 's', long = "seconds", default_value_t = false)]
    pub show_seconds: bool,

    /// Count up from zero
    #[arg(short = 'u', long = "count-up", default_value_t = false)]
    pub count_up: bool,

    /// Blink when the time is up
    #[arg(short = 'b', long = "blink", default_value_t = false, conflicts_with = "freeze")]
    pub blink: bool,

    /// Keep showing the final value when the time is up
    #[arg(short = 'f', long = "freeze", default_value_t = false)]
    pub freeze: bool,

    /// Finish time of day (06:30)
    #[arg(short = 't', long = "target", value_name = "HH:MM", conflicts_with = "duration")]
    pub target: Option<String>,

    /// Foreground color (name, #rrggbb or palette index)
    #[arg(short = 'c', long = "color", default_value = DEFAULT_COLOR)]
    pub color: String,

    /// Time span such as 10s, 5m30s or 1.5h
    #[arg(value_name = "DURATION")]
    pub duration: Option<String>,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "BLOCKCLOCK_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs)
    #[arg(long = "no-logs", env = "BLOCKCLOCK_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,
}

/// What happens once a countdown or bounded count-up reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndBehavior {
    #[default]
    Immediately,
    Blink,
    Freeze,
}

/// Which run loop drives the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Count down a span.
    Timer(Duration),
    /// Count up, optionally stopping at a span.
    Stopwatch(Option<Duration>),
    /// Show the local time of day.
    Clock,
}

/// Validated settings, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_seconds: bool,
    pub end: EndBehavior,
    /// Span from resolution time to the target, if any.
    pub target: Option<Duration>,
    pub count_up: bool,
    pub color: Color,
}

impl RenderOptions {
    pub fn mode(&self) -> DisplayMode {
        match (self.count_up, self.target) {
            (true, target) => DisplayMode::Stopwatch(target),
            (false, Some(target)) => DisplayMode::Timer(target),
            (false, None) => DisplayMode::Clock,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid duration {0:?}")]
    InvalidDuration(String),
    #[error("invalid target time {0:?} (expected HH:MM)")]
    InvalidTarget(String),
    #[error("unknown color {0:?}")]
    UnknownColor(String),
    #[error("time not specified")]
    MissingTime,
}
