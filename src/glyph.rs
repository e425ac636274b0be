//! Block glyphs for the large digit display.
//!
//! Each symbol is described as a small text grid where `x` marks a painted
//! cell. The grids are parsed once into point sets and then only read.

use std::ops::Add;

use thiserror::Error;

/// Height shared by every glyph, in rows.
pub const GLYPH_HEIGHT: i32 = 5;
/// Width of a digit glyph, in columns.
pub const DIGIT_WIDTH: i32 = 5;
/// Width of the `:` separator glyph, in columns.
pub const SEPARATOR_WIDTH: i32 = 1;

const MARKER: char = 'x';

const DIGIT_TEXT: [&str; 10] = [
    "xxxxx\n\
     x   x\n\
     x   x\n\
     x   x\n\
     xxxxx\n",
    "    x\n\
     \x20   x\n\
     \x20   x\n\
     \x20   x\n\
     \x20   x\n",
    "xxxxx\n\
     \x20   x\n\
     xxxxx\n\
     x    \n\
     xxxxx\n",
    "xxxxx\n\
     \x20   x\n\
     xxxxx\n\
     \x20   x\n\
     xxxxx\n",
    "x   x\n\
     x   x\n\
     xxxxx\n\
     \x20   x\n\
     \x20   x\n",
    "xxxxx\n\
     x    \n\
     xxxxx\n\
     \x20   x\n\
     xxxxx\n",
    "xxxxx\n\
     x    \n\
     xxxxx\n\
     x   x\n\
     xxxxx\n",
    "xxxxx\n\
     \x20   x\n\
     \x20   x\n\
     \x20   x\n\
     \x20   x\n",
    "xxxxx\n\
     x   x\n\
     xxxxx\n\
     x   x\n\
     xxxxx\n",
    "xxxxx\n\
     x   x\n\
     xxxxx\n\
     \x20   x\n\
     \x20   x\n",
];

const SEPARATOR_TEXT: &str = " \nx\n \nx\n \n";

/// Integer grid offset, used for glyph cells and screen positions alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// One renderable symbol of the large display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Digit(u8),
    Separator,
}

impl Symbol {
    /// Column width of the symbol's bounding box.
    pub fn width(self) -> i32 {
        match self {
            Symbol::Digit(_) => DIGIT_WIDTH,
            Symbol::Separator => SEPARATOR_WIDTH,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    #[error("no glyph for symbol {0:?}")]
    UnknownSymbol(Symbol),
    #[error("glyph for {symbol:?} does not fit its {width}x{height} box")]
    MalformedGlyph {
        symbol: Symbol,
        width: i32,
        height: i32,
    },
}

/// The painted cells of one symbol inside its bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDefinition {
    width: i32,
    cells: Vec<Point>,
}

impl GlyphDefinition {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }
}

/// Parse a text grid into the set of marked cells.
///
/// Rows are separated by `\n`; a trailing newline does not add a row.
pub fn parse_glyph(text: &str) -> Vec<Point> {
    let mut cells = Vec::new();
    for (y, line) in text.lines().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            if ch == MARKER {
                cells.push(Point::new(x as i32, y as i32));
            }
        }
    }
    cells
}

/// Immutable lookup from symbol to glyph, built once at startup.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    digits: Vec<GlyphDefinition>,
    separator: GlyphDefinition,
}

impl GlyphTable {
    /// Build the table from the built-in grids.
    pub fn standard() -> Result<Self, GlyphError> {
        let digits = DIGIT_TEXT
            .iter()
            .enumerate()
            .map(|(digit, text)| build(Symbol::Digit(digit as u8), text))
            .collect::<Result<Vec<_>, _>>()?;
        let separator = build(Symbol::Separator, SEPARATOR_TEXT)?;
        Ok(Self { digits, separator })
    }

    pub fn glyph_for(&self, symbol: Symbol) -> Result<&GlyphDefinition, GlyphError> {
        match symbol {
            Symbol::Digit(digit) => self
                .digits
                .get(digit as usize)
                .ok_or(GlyphError::UnknownSymbol(symbol)),
            Symbol::Separator => Ok(&self.separator),
        }
    }
}

fn build(symbol: Symbol, text: &str) -> Result<GlyphDefinition, GlyphError> {
    let width = symbol.width();
    let cells = parse_glyph(text);
    let fits = cells
        .iter()
        .all(|p| (0..width).contains(&p.x) && (0..GLYPH_HEIGHT).contains(&p.y));
    if !fits || cells.is_empty() {
        return Err(GlyphError::MalformedGlyph {
            symbol,
            width,
            height: GLYPH_HEIGHT,
        });
    }
    Ok(GlyphDefinition { width, cells })
}
