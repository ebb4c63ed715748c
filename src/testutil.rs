//! Shared test fixtures: a capturing pixel sink and a C8 blob builder.

use core::cell::RefCell;
use std::vec::Vec;

use crate::PixelSink;

/// Pixel sink double that records every write.
pub struct CapturePixels {
    writes: RefCell<Vec<(u16, u16, bool)>>,
}

impl CapturePixels {
    pub fn new() -> Self {
        Self {
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Total number of `set_pixel` calls, regardless of value.
    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    /// Deduplicated, sorted coordinates written with `on == true`.
    pub fn lit_sorted(&self) -> Vec<(u16, u16)> {
        let mut lit: Vec<(u16, u16)> = self
            .writes
            .borrow()
            .iter()
            .filter(|w| w.2)
            .map(|w| (w.0, w.1))
            .collect();
        lit.sort_unstable();
        lit.dedup();
        lit
    }
}

impl PixelSink for CapturePixels {
    fn set_pixel(&self, x: u16, y: u16, on: bool) {
        self.writes.borrow_mut().push((x, y, on));
    }
}

/// One glyph for [`build_font`].
pub struct GlyphSpec {
    pub code: u32,
    pub width: u8,
    pub height: u8,
    pub top: i8,
    pub left: i8,
    pub advance: u8,
    pub bitmap: Vec<u8>,
}

/// Assembles a well-formed C8 blob from glyph specs, in stored order.
pub fn build_font(glyph_height: u8, glyphs: &[GlyphSpec]) -> Vec<u8> {
    let mut font = std::vec![0xC8, 0x05, glyph_height];
    font.extend_from_slice(&(glyphs.len() as u16).to_le_bytes());

    let mut offset = 5 + glyphs.len() * 6;
    let mut records = Vec::new();
    for glyph in glyphs {
        font.extend_from_slice(&glyph.code.to_le_bytes());
        font.extend_from_slice(&(offset as u16).to_le_bytes());

        records.push(glyph.width);
        records.push(glyph.height);
        records.push(glyph.top as u8);
        records.push(glyph.left as u8);
        records.push(glyph.advance);
        records.extend_from_slice(&glyph.bitmap);
        offset += 5 + glyph.bitmap.len();
    }

    font.extend_from_slice(&records);
    font
}

/// Packed all-ones bitmap for `width` x `height` pixels.
pub fn solid_bitmap(width: u8, height: u8) -> Vec<u8> {
    let bits = width as usize * height as usize;
    std::vec![0xFF; (bits + 7) / 8]
}

/// Packs an `"X"`-for-set textual pattern into MSB-first bitmap bytes.
pub fn pattern_bitmap(rows: &[&str]) -> Vec<u8> {
    let width = rows.first().map_or(0, |r| r.len());
    let bits = width * rows.len();
    let mut bitmap = std::vec![0u8; (bits + 7) / 8];
    for (row, line) in rows.iter().enumerate() {
        for (col, cell) in line.bytes().enumerate() {
            if cell == b'X' {
                let index = row * width + col;
                bitmap[index >> 3] |= 0x80 >> (index & 7);
            }
        }
    }
    bitmap
}
