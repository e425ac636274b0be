//! Cell surface the renderer paints onto.

#[cfg(test)]
pub(crate) mod recording;
mod terminal;

use std::io;

use ratatui::style::Style;

pub use terminal::TerminalSurface;

/// A grid of styled cells with explicit flush.
///
/// Writes outside the current size are dropped, so callers may paint at
/// negative or oversized coordinates.
pub trait Surface {
    /// Current `(width, height)` in cells.
    fn size(&self) -> (u16, u16);
    /// Blank every cell and pick up the latest screen size.
    fn clear(&mut self);
    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: Style);
    fn fill(&mut self, ch: char, style: Style);
    /// Flush painted cells to the display.
    fn show(&mut self) -> io::Result<()>;
    /// Force a full repaint on the next flush, used after resize.
    fn sync(&mut self) -> io::Result<()>;
}

/// True when `(x, y)` lies inside a `width`x`height` grid.
pub(crate) fn in_bounds(x: i32, y: i32, width: u16, height: u16) -> bool {
    x >= 0 && y >= 0 && x < i32::from(width) && y < i32::from(height)
}
