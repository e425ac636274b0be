use std::io::{self, Stdout};

use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;

use super::{in_bounds, Surface};
use crate::terminal_restore::TerminalRestoreGuard;

/// Surface backed by a ratatui terminal. Cells are painted into an off-screen
/// canvas and copied into the frame on `show`, where ratatui diffs them
/// against what is already on screen.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    canvas: Buffer,
}

impl TerminalSurface<CrosstermBackend<Stdout>> {
    /// Put stdout into raw mode on the alternate screen and wrap it.
    pub fn open(guard: &TerminalRestoreGuard) -> io::Result<Self> {
        let mut stdout = io::stdout();
        guard.enable_raw_mode()?;
        guard.enter_alt_screen(&mut stdout)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(Self::new(terminal))
    }
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        let area = terminal.size().unwrap_or_default();
        Self {
            terminal,
            canvas: Buffer::empty(Rect::new(0, 0, area.width, area.height)),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn size(&self) -> (u16, u16) {
        match self.terminal.size() {
            Ok(area) => (area.width, area.height),
            Err(err) => {
                tracing::debug!(error = %err, "terminal size unavailable; using canvas size");
                (self.canvas.area.width, self.canvas.area.height)
            }
        }
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.canvas = Buffer::empty(Rect::new(0, 0, width, height));
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: Style) {
        let area = self.canvas.area;
        if !in_bounds(x, y, area.width, area.height) {
            return;
        }
        self.canvas
            .get_mut(x as u16, y as u16)
            .set_char(ch)
            .set_style(style);
    }

    fn fill(&mut self, ch: char, style: Style) {
        for cell in self.canvas.content.iter_mut() {
            cell.set_char(ch).set_style(style);
        }
    }

    fn show(&mut self) -> io::Result<()> {
        let canvas = &self.canvas;
        self.terminal.draw(|frame| {
            let area = frame.size();
            let buffer = frame.buffer_mut();
            let width = area.width.min(canvas.area.width);
            let height = area.height.min(canvas.area.height);
            for y in 0..height {
                for x in 0..width {
                    *buffer.get_mut(x, y) = canvas.get(x, y).clone();
                }
            }
        })?;
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        self.terminal.autoresize()?;
        self.terminal.clear()
    }
}
