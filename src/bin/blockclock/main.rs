//! Blockclock entrypoint: a full-screen countdown, stopwatch or wall clock.
//!
//! # Architecture
//!
//! - Input thread: turns Esc, `q` and Ctrl-C into a cancel, resizes into a resync
//! - Ticker thread: one tick per second on a fixed schedule
//! - Main thread: runs the display loop and restores the terminal on exit

mod input;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use blockclock::config::AppConfig;
use blockclock::glyph::GlyphTable;
use blockclock::render::Painter;
use blockclock::run_loop::{select_strategy, spawn_ticker, ExitStatus, RunLoop, TICK_PERIOD};
use blockclock::signal::{resize_channel, CancelToken, Signals};
use blockclock::surface::TerminalSurface;
use blockclock::terminal_restore::{restore_terminal, TerminalRestoreGuard};
use blockclock::{init_logging, log_file_path};

use crate::input::spawn_input_thread;

fn main() -> ExitCode {
    match run() {
        Ok(status) => ExitCode::from(status.code()),
        Err(err) => {
            restore_terminal();
            tracing::error!(error = %format!("{err:#}"), "blockclock failed");
            eprintln!("blockclock: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitStatus> {
    let config = AppConfig::parse();
    let (start, options) = config.resolve_now()?;
    init_logging(&config);
    tracing::debug!(log_file = %log_file_path().display(), options = ?options, "configured");

    let glyphs = GlyphTable::standard().context("glyph table is malformed")?;

    let terminal_guard = TerminalRestoreGuard::new();
    let mut surface = TerminalSurface::open(&terminal_guard).context("failed to open terminal")?;

    let cancel = CancelToken::new();
    let (notifier, resize) = resize_channel();
    let _input = spawn_input_thread(cancel.clone(), notifier);
    let signals = Signals::new(cancel, resize);

    let strategy = select_strategy(&options, start);
    let ticks = spawn_ticker(strategy.first_tick_delay(), TICK_PERIOD);

    let painter = Painter::new(&glyphs, options.show_seconds, options.color);
    let status = RunLoop::new(&mut surface, painter, options.end, &signals).run(
        strategy.as_ref(),
        ticks,
        start,
    )?;

    terminal_guard.restore();
    tracing::info!(status = ?status, "=== blockclock exiting ===");
    Ok(status)
}
