use super::*;
use crate::glyph::{DIGIT_WIDTH, GLYPH_HEIGHT};
use crate::surface::recording::RecordingSurface;
use std::collections::BTreeSet;

fn table() -> GlyphTable {
    GlyphTable::standard().expect("glyph table")
}

/// Read the large glyphs back into `HH:MM[:SS]` by matching each slot's
/// painted cells against the glyph table.
fn decode_large(surface: &RecordingSurface, table: &GlyphTable, show_seconds: bool) -> String {
    let (width, height) = surface.size();
    let layout = Layout::compute(i32::from(width), i32::from(height), show_seconds);
    assert_eq!(layout.mode, Mode::LargeGlyph);
    let mut cursor = layout.origin;
    let mut decoded = String::new();
    for slot in crate::layout::symbol_shape(show_seconds) {
        let slot_cells: BTreeSet<Point> = surface
            .painted()
            .keys()
            .filter(|p| {
                p.x >= cursor.x
                    && p.x < cursor.x + slot.width()
                    && p.y >= cursor.y
                    && p.y < cursor.y + GLYPH_HEIGHT
            })
            .map(|p| Point::new(p.x - cursor.x, p.y - cursor.y))
            .collect();
        match slot {
            Symbol::Separator => decoded.push(':'),
            Symbol::Digit(_) => {
                let digit = (0..10u8)
                    .find(|d| {
                        let glyph = table.glyph_for(Symbol::Digit(*d)).unwrap();
                        glyph.cells().iter().copied().collect::<BTreeSet<_>>() == slot_cells
                    })
                    .expect("painted cells match a digit");
                decoded.push(char::from(b'0' + digit));
            }
        }
        cursor.x += slot.width() + GLYPH_GAP;
    }
    decoded
}

fn paint_text(value: DisplayValue, show_seconds: bool) -> String {
    let table = table();
    let painter = Painter::new(&table, show_seconds, Color::Blue);
    let mut surface = RecordingSurface::new(80, 3);
    painter.paint(&mut surface, &value);
    surface.show().unwrap();
    surface.last_frame().unwrap().row_text(1)
}

#[test]
fn components_do_not_wrap_hours() {
    let value = DisplayValue::Elapsed(Duration::from_secs(30 * 3600 + 5 * 60 + 7));
    assert_eq!(value.components(), (30, 5, 7));
    assert_eq!(value.text(true), "30:05:07");
    assert_eq!(value.text(false), "30:05");
}

#[test]
fn hour_tens_wrap_silently_past_ninety_nine() {
    let value = DisplayValue::Elapsed(Duration::from_secs(123 * 3600));
    let symbols = value.symbols(false);
    assert_eq!(symbols[0], Symbol::Digit(2));
    assert_eq!(symbols[1], Symbol::Digit(3));
}

#[test]
fn time_of_day_components() {
    let value = DisplayValue::TimeOfDay(NaiveTime::from_hms_opt(6, 30, 9).unwrap());
    assert_eq!(value.text(true), "06:30:09");
    assert_eq!(value.symbols(true).len(), 8);
    assert_eq!(value.symbols(false).len(), 5);
}

#[test]
fn large_and_text_rendering_agree() {
    let table = table();
    let samples = [
        0,
        1,
        59,
        60,
        61,
        3599,
        3600,
        12 * 3600 + 34 * 60 + 56,
        23 * 3600 + 59 * 60 + 59,
        47 * 3600 + 8 * 60 + 19,
        99 * 3600 + 59 * 60 + 59,
    ];
    for show_seconds in [false, true] {
        for secs in samples {
            let value = DisplayValue::Elapsed(Duration::from_secs(secs));
            let painter = Painter::new(&table, show_seconds, Color::Green);
            let mut surface = RecordingSurface::new(80, 24);
            painter.paint(&mut surface, &value);
            let large = decode_large(&surface, &table, show_seconds);
            assert_eq!(large, paint_text(value, show_seconds), "{secs}s");
        }
    }
}

#[test]
fn large_mode_paints_background_blocks() {
    let table = table();
    let painter = Painter::new(&table, true, Color::Magenta);
    let mut surface = RecordingSurface::new(80, 24);
    painter.paint(&mut surface, &DisplayValue::Elapsed(Duration::from_secs(8)));
    assert!(!surface.painted().is_empty());
    for (ch, style) in surface.painted().values() {
        assert_eq!(*ch, ' ');
        assert_eq!(style.bg, Some(Color::Magenta));
    }
}

#[test]
fn short_screen_uses_text_fallback() {
    let table = table();
    let painter = Painter::new(&table, true, Color::Blue);
    let mut surface = RecordingSurface::new(200, 3);
    let layout = painter.paint(
        &mut surface,
        &DisplayValue::Elapsed(Duration::from_secs(3 * 3600 + 2 * 60 + 1)),
    );
    assert_eq!(layout.mode, Mode::TextFallback);
    surface.show().unwrap();
    let frame = surface.last_frame().unwrap();
    assert_eq!(frame.text(), "03:02:01");
    for (_, style) in frame.cells.values() {
        assert_eq!(style.fg, Some(Color::Blue));
    }
}

#[test]
fn paint_is_idempotent_for_same_value_and_size() {
    let table = table();
    let painter = Painter::new(&table, true, Color::Blue);
    let mut surface = RecordingSurface::new(60, 10);
    let value = DisplayValue::Elapsed(Duration::from_secs(4321));
    painter.paint(&mut surface, &value);
    surface.show().unwrap();
    painter.paint(&mut surface, &value);
    surface.show().unwrap();
    assert_eq!(surface.frames[0].cells, surface.frames[1].cells);
}

#[test]
fn paint_replaces_previous_frame() {
    let table = table();
    let painter = Painter::new(&table, false, Color::Blue);
    let mut surface = RecordingSurface::new(80, 2);
    painter.paint(&mut surface, &DisplayValue::Elapsed(Duration::from_secs(3600)));
    painter.paint(&mut surface, &DisplayValue::Elapsed(Duration::from_secs(60)));
    surface.show().unwrap();
    assert_eq!(surface.last_frame().unwrap().text(), "00:01");
}

#[test]
fn narrow_screen_clips_large_glyphs() {
    let table = table();
    let painter = Painter::new(&table, true, Color::Blue);
    let mut surface = RecordingSurface::new(10, 5);
    let layout = painter.paint(&mut surface, &DisplayValue::Elapsed(Duration::from_secs(0)));
    assert_eq!(layout.mode, Mode::LargeGlyph);
    assert!(layout.origin.x < 0);
    assert!(surface
        .painted()
        .keys()
        .all(|p| (0..10).contains(&p.x) && (0..5).contains(&p.y)));
}

#[test]
fn glyph_slots_advance_by_width_plus_gap() {
    let table = table();
    let painter = Painter::new(&table, false, Color::Blue);
    let mut surface = RecordingSurface::new(25, 5);
    painter.paint(
        &mut surface,
        &DisplayValue::Elapsed(Duration::from_secs(11 * 3600 + 11 * 60)),
    );
    // "1" is the right column of its box; four of them plus the separator.
    let columns: BTreeSet<i32> = surface.painted().keys().map(|p| p.x).collect();
    let slot = DIGIT_WIDTH + GLYPH_GAP;
    let expected: BTreeSet<i32> = [4, 4 + slot, 2 * slot, 2 * slot + 2 + 4, 2 * slot + 2 + slot + 4]
        .into_iter()
        .collect();
    assert_eq!(columns, expected);
}
