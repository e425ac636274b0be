//! Placement of the time display on the current screen.

use crate::glyph::{Point, Symbol, GLYPH_HEIGHT};

const TEXT_HH_MM: &str = "00:00";
const TEXT_HH_MM_SS: &str = "00:00:00";

/// Gap between neighbouring glyphs in large mode.
pub const GLYPH_GAP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    LargeGlyph,
    TextFallback,
}

/// Mode, size and origin for one paint. Recomputed on every paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub mode: Mode,
    pub width: i32,
    pub height: i32,
    pub origin: Point,
}

impl Layout {
    pub fn compute(screen_width: i32, screen_height: i32, show_seconds: bool) -> Self {
        let mode = decide_mode(screen_width, screen_height, show_seconds);
        let (width, height) = dimensions(mode, show_seconds);
        let origin = center_offset(screen_width, screen_height, width, height);
        Self {
            mode,
            width,
            height,
            origin,
        }
    }
}

/// Large glyphs need the full glyph height; width never forces the fallback.
pub fn decide_mode(_screen_width: i32, screen_height: i32, _show_seconds: bool) -> Mode {
    if screen_height >= GLYPH_HEIGHT {
        Mode::LargeGlyph
    } else {
        Mode::TextFallback
    }
}

/// Symbol order of `HH:MM` or `HH:MM:SS`, with placeholder digits.
pub fn symbol_shape(show_seconds: bool) -> &'static [Symbol] {
    const HH_MM: [Symbol; 5] = [
        Symbol::Digit(0),
        Symbol::Digit(0),
        Symbol::Separator,
        Symbol::Digit(0),
        Symbol::Digit(0),
    ];
    const HH_MM_SS: [Symbol; 8] = [
        Symbol::Digit(0),
        Symbol::Digit(0),
        Symbol::Separator,
        Symbol::Digit(0),
        Symbol::Digit(0),
        Symbol::Separator,
        Symbol::Digit(0),
        Symbol::Digit(0),
    ];
    if show_seconds {
        &HH_MM_SS
    } else {
        &HH_MM
    }
}

pub fn dimensions(mode: Mode, show_seconds: bool) -> (i32, i32) {
    match mode {
        Mode::LargeGlyph => {
            let symbols = symbol_shape(show_seconds);
            let glyphs: i32 = symbols.iter().map(|symbol| symbol.width()).sum();
            let gaps = (symbols.len() as i32 - 1) * GLYPH_GAP;
            (glyphs + gaps, GLYPH_HEIGHT)
        }
        Mode::TextFallback => {
            let text = if show_seconds {
                TEXT_HH_MM_SS
            } else {
                TEXT_HH_MM
            };
            (text.chars().count() as i32, 1)
        }
    }
}

/// Top-left corner that centers `width`x`height` content. Negative when the
/// content is larger than the screen; the surface clips what falls outside.
pub fn center_offset(screen_width: i32, screen_height: i32, width: i32, height: i32) -> Point {
    Point::new(
        (screen_width - width).div_euclid(2),
        (screen_height - height).div_euclid(2),
    )
}
