use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime, Timelike};

use crate::config::{DisplayMode, RenderOptions};
use crate::render::DisplayValue;

use super::TICK_PERIOD;

/// What a run loop shows and when it is done. The loop itself is shared by
/// every mode; only these three answers differ.
pub trait Strategy {
    fn name(&self) -> &'static str;
    fn value_at(&self, now: Instant) -> DisplayValue;
    fn is_ended(&self, now: Instant) -> bool;
    /// Delay before the first tick; later ticks follow every [`TICK_PERIOD`].
    fn first_tick_delay(&self) -> Duration {
        TICK_PERIOD
    }
}

/// Pick the strategy for the resolved options. Counting modes measure from
/// `start`; the clock reads the local wall clock.
pub fn select_strategy(options: &RenderOptions, start: Instant) -> Box<dyn Strategy> {
    match options.mode() {
        DisplayMode::Timer(span) => Box::new(TimerStrategy::new(start, span)),
        DisplayMode::Stopwatch(limit) => Box::new(StopwatchStrategy::new(start, limit)),
        DisplayMode::Clock => Box::new(ClockStrategy::new()),
    }
}

/// Counts down to `target`.
#[derive(Debug, Clone, Copy)]
pub struct TimerStrategy {
    target: Instant,
}

impl TimerStrategy {
    pub fn new(start: Instant, span: Duration) -> Self {
        Self {
            target: start + span,
        }
    }
}

impl Strategy for TimerStrategy {
    fn name(&self) -> &'static str {
        "timer"
    }

    fn value_at(&self, now: Instant) -> DisplayValue {
        DisplayValue::Elapsed(round_to_second(self.target.saturating_duration_since(now)))
    }

    fn is_ended(&self, now: Instant) -> bool {
        now >= self.target
    }
}

/// Counts up from `start`, optionally stopping at `limit`.
#[derive(Debug, Clone, Copy)]
pub struct StopwatchStrategy {
    start: Instant,
    limit: Option<Duration>,
}

impl StopwatchStrategy {
    pub fn new(start: Instant, limit: Option<Duration>) -> Self {
        Self { start, limit }
    }
}

impl Strategy for StopwatchStrategy {
    fn name(&self) -> &'static str {
        "stopwatch"
    }

    fn value_at(&self, now: Instant) -> DisplayValue {
        let elapsed = now.saturating_duration_since(self.start);
        let shown = match self.limit {
            Some(limit) => elapsed.min(limit),
            None => elapsed,
        };
        DisplayValue::Elapsed(shown)
    }

    fn is_ended(&self, now: Instant) -> bool {
        self.limit
            .is_some_and(|limit| now.saturating_duration_since(self.start) >= limit)
    }
}

/// Reads the current local date and time.
pub type WallClock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub fn local_wall_clock() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Local time of day, read from the wall clock on every tick so clock steps
/// and offset changes show up on the next frame.
pub struct ClockStrategy {
    read_wall: WallClock,
}

impl ClockStrategy {
    pub fn new() -> Self {
        Self::with_source(local_wall_clock)
    }

    pub fn with_source(source: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        Self {
            read_wall: Box::new(source),
        }
    }
}

impl Default for ClockStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for ClockStrategy {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn value_at(&self, _now: Instant) -> DisplayValue {
        DisplayValue::TimeOfDay((self.read_wall)().time())
    }

    fn is_ended(&self, _now: Instant) -> bool {
        false
    }

    /// Lands the first tick on the next whole wall-clock second.
    fn first_tick_delay(&self) -> Duration {
        let wall = (self.read_wall)();
        let into_second = Duration::from_nanos(u64::from(wall.nanosecond() % 1_000_000_000));
        TICK_PERIOD.saturating_sub(into_second)
    }
}

/// Ticks arrive a little after each whole second; rounding keeps a countdown
/// from skipping a digit because of that lag.
fn round_to_second(duration: Duration) -> Duration {
    let secs = duration.as_secs() + u64::from(duration.subsec_millis() >= 500);
    Duration::from_secs(secs)
}
