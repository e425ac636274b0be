use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        OnceLock,
    },
};

static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALT_SCREEN_ENABLED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// RAII guard to restore terminal state on drop (and on panic via a shared hook).
pub struct TerminalRestoreGuard;

impl TerminalRestoreGuard {
    pub fn new() -> Self {
        install_terminal_panic_hook();
        TerminalRestoreGuard
    }

    pub fn enable_raw_mode(&self) -> io::Result<()> {
        enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub fn enter_alt_screen(&self, stdout: &mut impl Write) -> io::Result<()> {
        execute!(stdout, EnterAlternateScreen)?;
        ALT_SCREEN_ENABLED.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub fn restore(&self) {
        restore_terminal();
    }
}

impl Default for TerminalRestoreGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave the alternate screen and raw mode if we entered them. Idempotent.
pub fn restore_terminal() {
    restore_into(&mut io::stdout());
}

/// Returns `false`, writing nothing, when the terminal was never set up.
fn restore_into(out: &mut impl Write) -> bool {
    let alt_screen = ALT_SCREEN_ENABLED.swap(false, Ordering::SeqCst);
    let raw_mode = RAW_MODE_ENABLED.swap(false, Ordering::SeqCst);
    if !alt_screen && !raw_mode {
        return false;
    }
    if alt_screen {
        let _ = execute!(out, LeaveAlternateScreen);
    }
    if raw_mode {
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(error = %err, "failed to leave raw mode");
        }
    }
    let _ = execute!(out, Show);
    let _ = out.flush();
    true
}

pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            crate::log_panic(info);
            previous(info);
        }));
    });
}
