//! The once-per-second display loop shared by timer, stopwatch and clock.
//!
//! # Event sources
//!
//! - Ticker thread: one `Instant` per second (see [`spawn_ticker`])
//! - Cancel token: fired by the input listener on Esc, `q` or Ctrl-C
//! - Resize channel: forces a resync and repaint with a fresh layout
//!
//! Cancellation wins whenever it is ready, even if a tick or resize is queued.

mod blink;
mod strategy;

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossbeam_channel::{bounded, never, select, Receiver, TrySendError};

use crate::config::EndBehavior;
use crate::render::{DisplayValue, Painter};
use crate::signal::Signals;
use crate::surface::Surface;

pub use blink::{run_blink, spawn_pulse_generator, BLINK_PATTERN};
pub use strategy::{
    local_wall_clock, select_strategy, ClockStrategy, StopwatchStrategy, Strategy, TimerStrategy,
    WallClock,
};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Exit code reported when the user quits before the run completes.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// How a run loop finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The target was reached and the end behavior ran its course.
    Completed,
    /// The user quit first.
    Interrupted,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Completed => 0,
            ExitStatus::Interrupted => INTERRUPTED_EXIT_CODE,
        }
    }
}

/// Send `Instant::now()` after `first`, then every `period` on a fixed
/// schedule. Ticks are dropped while the consumer is behind; the thread
/// exits once the receiver is gone.
pub fn spawn_ticker(first: Duration, period: Duration) -> Receiver<Instant> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let mut due = Instant::now() + first;
        loop {
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
            match tx.try_send(Instant::now()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => tracing::trace!("tick dropped; display is behind"),
                Err(TrySendError::Disconnected(_)) => break,
            }
            due += period;
        }
        tracing::trace!("ticker stopped");
    });
    rx
}

/// Owns the surface for the duration of one run.
pub struct RunLoop<'a, S: Surface> {
    surface: &'a mut S,
    painter: Painter<'a>,
    end: EndBehavior,
    signals: &'a Signals,
}

impl<'a, S: Surface> RunLoop<'a, S> {
    pub fn new(
        surface: &'a mut S,
        painter: Painter<'a>,
        end: EndBehavior,
        signals: &'a Signals,
    ) -> Self {
        Self {
            surface,
            painter,
            end,
            signals,
        }
    }

    /// Paint the value at `start`, then repaint on every tick until the
    /// strategy ends (per the end behavior) or the user quits.
    pub fn run(
        &mut self,
        strategy: &dyn Strategy,
        ticks: Receiver<Instant>,
        start: Instant,
    ) -> Result<ExitStatus> {
        let signals = self.signals;
        tracing::info!(mode = strategy.name(), end = ?self.end, "run loop started");
        let mut shown = strategy.value_at(start);
        self.repaint(&shown)?;

        let closed = never();
        let mut resize_open = true;
        let mut ended = false;
        loop {
            let resize = if resize_open {
                &signals.resize
            } else {
                &closed
            };
            select! {
                recv(signals.cancel.receiver()) -> _ => {
                    tracing::info!(mode = strategy.name(), "run loop interrupted");
                    return Ok(ExitStatus::Interrupted);
                }
                recv(resize) -> msg => {
                    if msg.is_err() {
                        resize_open = false;
                        continue;
                    }
                    if signals.cancel.is_cancelled() {
                        tracing::info!(mode = strategy.name(), "run loop interrupted");
                        return Ok(ExitStatus::Interrupted);
                    }
                    tracing::debug!("terminal resized");
                    self.surface.sync().context("resync after resize")?;
                    self.repaint(&shown)?;
                }
                recv(ticks) -> tick => {
                    let Ok(now) = tick else {
                        bail!("tick source closed");
                    };
                    if signals.cancel.is_cancelled() {
                        tracing::info!(mode = strategy.name(), "run loop interrupted");
                        return Ok(ExitStatus::Interrupted);
                    }
                    shown = strategy.value_at(now);
                    self.repaint(&shown)?;
                    if ended || !strategy.is_ended(now) {
                        continue;
                    }
                    ended = true;
                    tracing::info!(mode = strategy.name(), end = ?self.end, "target reached");
                    match self.end {
                        EndBehavior::Immediately => return Ok(ExitStatus::Completed),
                        EndBehavior::Blink => {
                            let style = self.painter.block_style();
                            run_blink(&mut *self.surface, style, signals)?;
                            return Ok(ExitStatus::Completed);
                        }
                        EndBehavior::Freeze => {}
                    }
                }
            }
        }
    }

    fn repaint(&mut self, value: &DisplayValue) -> Result<()> {
        self.painter.paint(&mut *self.surface, value);
        self.surface.show().context("flush frame")
    }
}
