use std::thread;
use std::time::Duration;

use crossterm::event;

use blockclock::signal::{CancelToken, ResizeNotifier};

use crate::input::event::{classify, InputEvent};

const INPUT_POLL_MS: u64 = 250;

/// Listen for quit keys and resizes for the rest of the process.
pub(crate) fn spawn_input_thread(
    cancel: CancelToken,
    resize: ResizeNotifier,
) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        match event::poll(Duration::from_millis(INPUT_POLL_MS)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(err) => {
                tracing::warn!(error = %err, "input poll failed");
                break;
            }
        }
        let event = match event::read() {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "input read failed");
                break;
            }
        };
        match classify(&event) {
            Some(InputEvent::Quit) => {
                if cancel.cancel() {
                    tracing::info!("quit requested");
                }
            }
            Some(InputEvent::Resize) => {
                if !resize.notify() {
                    tracing::debug!("resize listener gone");
                }
            }
            None => {}
        }
    })
}
