use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use ratatui::style::Color;

use super::{parse_duration, AppConfig, ConfigError, EndBehavior, RenderOptions};

impl AppConfig {
    /// Check CLI values and fix the target relative to `now`.
    pub fn resolve(&self, now: DateTime<Local>) -> Result<RenderOptions, ConfigError> {
        let color = Color::from_str(&self.color)
            .map_err(|_| ConfigError::UnknownColor(self.color.clone()))?;

        let mut target = match &self.target {
            Some(text) => Some(span_until(parse_clock_time(text)?, now, text)?),
            None => None,
        };
        if let Some(text) = &self.duration {
            target = Some(parse_duration(text)?);
        }

        let end = if self.blink {
            EndBehavior::Blink
        } else if self.freeze {
            EndBehavior::Freeze
        } else {
            EndBehavior::Immediately
        };
        if end != EndBehavior::Immediately && target.is_none() && !self.count_up {
            return Err(ConfigError::MissingTime);
        }

        Ok(RenderOptions {
            show_seconds: self.show_seconds,
            end,
            target,
            count_up: self.count_up,
            color,
        })
    }

    /// Resolve against the current local time. The returned `Instant` is the
    /// monotonic moment the target span was measured from, so a run started
    /// from it reaches a `-t` target on time however long setup takes.
    pub fn resolve_now(&self) -> Result<(Instant, RenderOptions), ConfigError> {
        let start = Instant::now();
        let options = self.resolve(Local::now())?;
        Ok((start, options))
    }

    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}

/// Parse `HH:MM` (24-hour clock, single-digit hours allowed).
pub fn parse_clock_time(text: &str) -> Result<NaiveTime, ConfigError> {
    let invalid = || ConfigError::InvalidTarget(text.to_string());
    let (hours, minutes) = text.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

/// Time from `now` until the next local occurrence of `at`. A time equal to
/// `now` or already past today rolls over to tomorrow.
fn span_until(at: NaiveTime, now: DateTime<Local>, text: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidTarget(text.to_string());
    let today = now.date_naive();
    let mut target = Local
        .from_local_datetime(&today.and_time(at))
        .earliest()
        .ok_or_else(invalid)?;
    if target <= now {
        let tomorrow = today.checked_add_days(Days::new(1)).ok_or_else(invalid)?;
        target = Local
            .from_local_datetime(&tomorrow.and_time(at))
            .earliest()
            .ok_or_else(invalid)?;
    }
    (target - now).to_std().map_err(|_| invalid())
}
