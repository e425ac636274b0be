//! Painting a time value onto a [`Surface`].

use std::time::Duration;

use chrono::{NaiveTime, Timelike};
use ratatui::style::{Color, Style};

use crate::glyph::{GlyphTable, Point, Symbol};
use crate::layout::{Layout, Mode, GLYPH_GAP};
use crate::surface::Surface;

/// What the display shows on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayValue {
    Elapsed(Duration),
    TimeOfDay(NaiveTime),
}

impl DisplayValue {
    /// `(hours, minutes, seconds)`. Durations keep every hour; no 24h wrap.
    pub fn components(&self) -> (u64, u64, u64) {
        match self {
            DisplayValue::Elapsed(duration) => {
                let secs = duration.as_secs();
                (secs / 3600, secs / 60 % 60, secs % 60)
            }
            DisplayValue::TimeOfDay(time) => (
                u64::from(time.hour()),
                u64::from(time.minute()),
                u64::from(time.second()),
            ),
        }
    }

    /// Large-glyph sequence. Tens digits wrap past 99 hours.
    pub fn symbols(&self, show_seconds: bool) -> Vec<Symbol> {
        let (hours, minutes, seconds) = self.components();
        let mut symbols = vec![
            digit(hours / 10),
            digit(hours),
            Symbol::Separator,
            digit(minutes / 10),
            digit(minutes),
        ];
        if show_seconds {
            symbols.extend([Symbol::Separator, digit(seconds / 10), digit(seconds)]);
        }
        symbols
    }

    /// Zero-padded `HH:MM` or `HH:MM:SS`.
    pub fn text(&self, show_seconds: bool) -> String {
        let (hours, minutes, seconds) = self.components();
        if show_seconds {
            format!("{hours:02}:{minutes:02}:{seconds:02}")
        } else {
            format!("{hours:02}:{minutes:02}")
        }
    }
}

fn digit(value: u64) -> Symbol {
    Symbol::Digit((value % 10) as u8)
}

/// Renders display values with a fixed glyph table, color and precision.
#[derive(Debug, Clone, Copy)]
pub struct Painter<'a> {
    glyphs: &'a GlyphTable,
    show_seconds: bool,
    color: Color,
}

impl<'a> Painter<'a> {
    pub fn new(glyphs: &'a GlyphTable, show_seconds: bool, color: Color) -> Self {
        Self {
            glyphs,
            show_seconds,
            color,
        }
    }

    /// Style for solid blocks: large glyph cells and blink fills.
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.color)
    }

    fn text_style(&self) -> Style {
        Style::default().fg(self.color)
    }

    /// Clear the surface and draw `value` centered for its current size.
    /// Does not flush.
    pub fn paint<S: Surface>(&self, surface: &mut S, value: &DisplayValue) -> Layout {
        surface.clear();
        let (width, height) = surface.size();
        let layout = Layout::compute(i32::from(width), i32::from(height), self.show_seconds);
        match layout.mode {
            Mode::LargeGlyph => self.paint_glyphs(surface, layout.origin, value),
            Mode::TextFallback => self.paint_text(surface, layout.origin, value),
        }
        layout
    }

    fn paint_glyphs<S: Surface>(&self, surface: &mut S, origin: Point, value: &DisplayValue) {
        let style = self.block_style();
        let mut cursor = origin;
        for symbol in value.symbols(self.show_seconds) {
            match self.glyphs.glyph_for(symbol) {
                Ok(glyph) => {
                    for cell in glyph.cells() {
                        let at = cursor + *cell;
                        surface.set_cell(at.x, at.y, ' ', style);
                    }
                }
                Err(err) => tracing::warn!(error = %err, "skipping glyph"),
            }
            cursor.x += symbol.width() + GLYPH_GAP;
        }
    }

    fn paint_text<S: Surface>(&self, surface: &mut S, origin: Point, value: &DisplayValue) {
        let style = self.text_style();
        for (index, ch) in value.text(self.show_seconds).chars().enumerate() {
            surface.set_cell(origin.x + index as i32, origin.y, ch, style);
        }
    }
}

#[cfg(test)]
mod tests;
