//! Full-screen blink shown after a timer ends.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, never, select, Receiver};
use ratatui::style::Style;

use crate::signal::Signals;
use crate::surface::Surface;

/// On/off pulse: two short flashes, then a longer pause.
pub static BLINK_PATTERN: [(bool, Duration); 4] = [
    (true, Duration::from_millis(150)),
    (false, Duration::from_millis(150)),
    (true, Duration::from_millis(150)),
    (false, Duration::from_millis(400)),
];

/// Emit the pattern's states forever on a background thread. The thread
/// stops once the receiver is dropped.
pub fn spawn_pulse_generator(pattern: &'static [(bool, Duration)]) -> Receiver<bool> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        for &(on, hold) in pattern.iter().cycle() {
            if tx.send(on).is_err() {
                break;
            }
            thread::sleep(hold);
        }
        tracing::trace!("pulse generator stopped");
    });
    rx
}

/// Alternate between a filled and a cleared surface until cancelled.
pub fn run_blink<S: Surface>(surface: &mut S, style: Style, signals: &Signals) -> Result<()> {
    tracing::info!("blink started");
    let pulses = spawn_pulse_generator(&BLINK_PATTERN);
    let closed = never();
    let mut resize_open = true;
    let mut lit = false;
    loop {
        let resize = if resize_open { &signals.resize } else { &closed };
        select! {
            recv(signals.cancel.receiver()) -> _ => break,
            recv(resize) -> msg => {
                if msg.is_err() {
                    resize_open = false;
                    continue;
                }
                if signals.cancel.is_cancelled() {
                    break;
                }
                surface.sync().context("resync after resize")?;
                draw(surface, style, lit)?;
            }
            recv(pulses) -> pulse => {
                let Ok(on) = pulse else { break };
                if signals.cancel.is_cancelled() {
                    break;
                }
                lit = on;
                draw(surface, style, lit)?;
            }
        }
    }
    tracing::info!("blink stopped");
    Ok(())
}

fn draw<S: Surface>(surface: &mut S, style: Style, lit: bool) -> Result<()> {
    surface.clear();
    if lit {
        surface.fill(' ', style);
    }
    surface.show().context("flush blink frame")
}
