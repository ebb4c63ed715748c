//! C8 font blob parsing and validation.
//!
//! Blob layout, all multi-byte fields little-endian:
//!
//! ```text
//! signature(1) | header_len(1) | glyph_height(1) | char_count(2)
//! char_map: char_count x { utf32_code(4) | glyph_offset(2) }
//! glyph records: { width(1) | height(1) | top(1,signed) | left(1,signed)
//!                  | advance(1) | bitmap(ceil(width*height/8)) }
//! ```
//!
//! Glyph offsets count from the start of the blob and must be non-decreasing
//! in stored char-map order. The blob is treated as a pure value: headers are
//! re-parsed per call and nothing is cached.

use crate::{Error, CMAP_ENTRY_LEN, FONT_HEADER_LEN, FONT_SIGNATURE};

/// Glyph record header size in the blob.
pub(crate) const GLYPH_HEADER_LEN: usize = 5;

/// Fixed header fields shared by the whole blob.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontHeader {
    /// Offset of the character map (the header's own length).
    pub header_len: u8,
    /// Nominal glyph height in pixels; lines are spaced this plus one apart.
    pub glyph_height: u8,
    /// Number of character-map entries.
    pub char_count: u16,
}

/// Per-glyph metrics stored immediately before its packed bitmap.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphHeader {
    /// Bitmap width in pixels.
    pub width: u8,
    /// Bitmap height in pixels.
    pub height: u8,
    /// Rows from the baseline up to the bitmap's top edge, signed.
    pub top: i8,
    /// Columns from the cursor to the bitmap's left edge, signed.
    pub left: i8,
    /// Nominal cursor advance after this glyph.
    pub advance: u8,
}

/// Parses the fixed header. Checks only what rendering needs: presence and
/// the signature byte. [`validate_font`] performs the full structural check.
pub fn parse_header(font: &[u8]) -> Result<FontHeader, Error> {
    if font.is_empty() {
        return Err(Error::FontEmpty);
    }
    if font.len() < FONT_HEADER_LEN as usize {
        return Err(Error::FontTruncated);
    }
    if font[0] != FONT_SIGNATURE {
        return Err(Error::BadSignature(font[0]));
    }
    Ok(FontHeader {
        header_len: font[1],
        glyph_height: font[2],
        char_count: u16::from_le_bytes([font[3], font[4]]),
    })
}

/// Checks the blob shape without touching glyph data: signature, header
/// length and the monotonic character-map offset invariant.
///
/// Pure and deterministic; a conforming consumer rejects any blob that fails
/// here before using it.
pub fn validate_font(font: &[u8]) -> Result<(), Error> {
    let header = parse_header(font)?;
    if header.header_len != FONT_HEADER_LEN {
        return Err(Error::BadHeaderLen(header.header_len));
    }

    let cmap_start = header.header_len as usize;
    let cmap_len = header.char_count as usize * CMAP_ENTRY_LEN;
    let cmap = font
        .get(cmap_start..cmap_start + cmap_len)
        .ok_or(Error::FontTruncated)?;

    // Glyph records live after the map; offsets must never move backwards.
    let mut last_offset = cmap_start + cmap_len;
    for (i, entry) in cmap.chunks_exact(CMAP_ENTRY_LEN).enumerate() {
        let offset = u16::from_le_bytes([entry[4], entry[5]]) as usize;
        if offset < last_offset {
            return Err(Error::NonMonotonicOffset(i as u16));
        }
        last_offset = offset;
    }

    Ok(())
}

/// Finds the glyph record offset for `code` by scanning the character map.
///
/// Fonts are small and static, so no index is built; cost is one linear pass
/// over the map per call. Returns `None` when the code is unmapped, when its
/// entry stores the null offset 0, or when the map is truncated.
pub fn lookup_glyph(font: &[u8], code: u32) -> Option<u16> {
    let header = parse_header(font).ok()?;
    let cmap_start = header.header_len as usize;
    let cmap_len = header.char_count as usize * CMAP_ENTRY_LEN;
    let cmap = font.get(cmap_start..cmap_start + cmap_len)?;

    for entry in cmap.chunks_exact(CMAP_ENTRY_LEN) {
        if u32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]) == code {
            // Offset 0 marks a null entry; the code falls back to the
            // missing-glyph placeholder.
            let offset = u16::from_le_bytes([entry[4], entry[5]]);
            return (offset != 0).then_some(offset);
        }
    }

    None
}

/// Decodes the glyph record at `offset`: the metrics header plus a view of
/// the packed MSB-first bitmap bytes. `None` when the blob cannot hold the
/// record it claims.
pub fn glyph_at(font: &[u8], offset: u16) -> Option<(GlyphHeader, &[u8])> {
    let start = offset as usize;
    let head = font.get(start..start + GLYPH_HEADER_LEN)?;
    let header = GlyphHeader {
        width: head[0],
        height: head[1],
        top: head[2] as i8,
        left: head[3] as i8,
        advance: head[4],
    };

    let bits = header.width as usize * header.height as usize;
    let bitmap = font.get(start + GLYPH_HEADER_LEN..start + GLYPH_HEADER_LEN + (bits + 7) / 8)?;

    Some((header, bitmap))
}
