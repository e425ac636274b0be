//! In-memory surface that keeps a snapshot of every flushed frame.

use std::collections::BTreeMap;
use std::io;
use std::time::Instant;

use ratatui::style::Style;

use super::{in_bounds, Surface};
use crate::glyph::Point;
use crate::signal::CancelToken;

pub(crate) type Cells = BTreeMap<Point, (char, Style)>;

#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) cells: Cells,
    pub(crate) at: Instant,
    width: u16,
    height: u16,
}

impl Frame {
    pub(crate) fn is_filled(&self) -> bool {
        self.cells.len() == usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    /// Characters painted on row `y`, left to right.
    pub(crate) fn row_text(&self, y: i32) -> String {
        self.cells
            .iter()
            .filter(|(point, _)| point.y == y)
            .map(|(_, (ch, _))| *ch)
            .collect()
    }

    /// All painted characters in reading order.
    pub(crate) fn text(&self) -> String {
        let mut cells: Vec<_> = self.cells.iter().collect();
        cells.sort_by_key(|(point, _)| (point.y, point.x));
        cells.into_iter().map(|(_, (ch, _))| *ch).collect()
    }
}

pub(crate) struct RecordingSurface {
    width: u16,
    height: u16,
    cells: Cells,
    pub(crate) frames: Vec<Frame>,
    pub(crate) syncs: usize,
    cancel_after: Option<(usize, CancelToken)>,
    resize_after: Option<(usize, u16, u16)>,
}

impl RecordingSurface {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: Cells::new(),
            frames: Vec::new(),
            syncs: 0,
            cancel_after: None,
            resize_after: None,
        }
    }

    /// Fire `token` once `frames` frames have been shown.
    pub(crate) fn cancel_after(mut self, frames: usize, token: CancelToken) -> Self {
        self.cancel_after = Some((frames, token));
        self
    }

    /// Switch to `width`x`height` once `frames` frames have been shown.
    pub(crate) fn resize_after(mut self, frames: usize, width: u16, height: u16) -> Self {
        self.resize_after = Some((frames, width, height));
        self
    }

    pub(crate) fn painted(&self) -> &Cells {
        &self.cells
    }

    pub(crate) fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if in_bounds(x, y, self.width, self.height) {
            self.cells.insert(Point::new(x, y), (ch, style));
        }
    }

    fn fill(&mut self, ch: char, style: Style) {
        for y in 0..i32::from(self.height) {
            for x in 0..i32::from(self.width) {
                self.cells.insert(Point::new(x, y), (ch, style));
            }
        }
    }

    fn show(&mut self) -> io::Result<()> {
        self.frames.push(Frame {
            cells: self.cells.clone(),
            at: Instant::now(),
            width: self.width,
            height: self.height,
        });
        if let Some((after, width, height)) = self.resize_after {
            if self.frames.len() == after {
                self.width = width;
                self.height = height;
            }
        }
        if let Some((after, token)) = &self.cancel_after {
            if self.frames.len() >= *after {
                token.cancel();
            }
        }
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        self.syncs += 1;
        Ok(())
    }
}
