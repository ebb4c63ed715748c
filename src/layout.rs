//! String layout and the public print surface.
//!
//! Measuring and rendering share one walk over the UTF-8 bytes: decode a
//! code point, look it up, then either accumulate its metrics or hand it to
//! the rasterizer. Text is left-to-right with explicit `\n` line breaks; a
//! NUL byte ends the walk early. Decode failures abort the whole operation,
//! while an individual glyph or rectangle falling off screen never does.

use crate::font::{glyph_at, lookup_glyph, parse_header};
use crate::raster::draw_glyph;
use crate::rect::draw_rect;
use crate::utf8::{decode_utf8, encode_utf32};
use crate::{Error, PrintForm, Rect, CFG_BOUNDING_BOX, CFG_INVERT, CFG_SPACING};

/// Side length of the square drawn in place of an unmapped code point.
fn missing_glyph_side(glyph_height: u8) -> i16 {
    (glyph_height as i16) * 2 / 3
}

/// Computes the rectangle `text` would cover if printed at `(x, y)`,
/// including the form's padding on every side. Nothing is drawn.
pub fn str_rect(form: &PrintForm, text: &[u8], x: i16, y: i16) -> Result<Rect, Error> {
    let header = parse_header(form.font)?;
    let use_spacing = form.config & CFG_SPACING != 0;

    let mut py = y;
    let mut min_y = i16::MAX;
    let mut max_y = py;
    let mut line_width: i16 = 0;
    let mut max_width: i16 = 0;

    let mut pos = 0;
    while pos < text.len() && text[pos] != 0 {
        if text[pos] == b'\n' {
            py -= header.glyph_height as i16 + 1;
            pos += 1;

            // The last glyph of a line carries no trailing gap.
            if use_spacing {
                line_width -= form.spacing as i16;
            }
            max_width = max_width.max(line_width);
            line_width = 0;
            continue;
        }

        let (code, len) = decode_utf8(&text[pos..])?;
        pos += len as usize;

        match lookup_glyph(form.font, code) {
            Some(offset) => {
                let (glyph, _) = glyph_at(form.font, offset).ok_or(Error::FontTruncated)?;

                line_width += glyph.advance.max(glyph.width) as i16;
                if use_spacing {
                    line_width += form.spacing as i16;
                }
                line_width += glyph.left as i16;

                let glyph_min = py - (glyph.height as i16 - glyph.top as i16);
                min_y = min_y.min(glyph_min);
                max_y = max_y.max(glyph_min + glyph.height as i16);
            }
            None => {
                let side = missing_glyph_side(header.glyph_height);
                line_width += side;
                max_y = max_y.max(py + side);
                min_y = min_y.min(py);
            }
        }
    }
    max_width = max_width.max(line_width);

    // Nothing measured: collapse to the start line instead of the sentinel.
    if min_y > max_y {
        min_y = max_y;
    }

    let padding = form.padding as i16;
    Ok(Rect {
        x: x - padding,
        y: min_y - padding,
        width: (max_width + 2 * padding) as u16,
        height: (max_y - min_y + 2 * padding) as u16,
    })
}

/// Width in pixels `text` would occupy, including padding.
pub fn str_width(form: &PrintForm, text: &[u8]) -> Result<u16, Error> {
    Ok(str_rect(form, text, 0, 0)?.width)
}

/// Renders `text` at `(x, y)` and returns the next cursor x position.
///
/// Applies the form's padding to the start cursor. With [`CFG_BOUNDING_BOX`]
/// set, the text bounds are drawn first (filled when [`CFG_INVERT`] is set,
/// outlined otherwise) and the returned cursor includes the box margin.
pub fn print_str(form: &PrintForm, text: &[u8], x: i16, y: i16) -> Result<i16, Error> {
    let padding = form.padding as i16;
    let px = x + padding;
    let py = y + padding;

    if form.config & CFG_BOUNDING_BOX != 0 {
        let bounds = str_rect(form, text, px, py)?;
        let fill = form.config & CFG_INVERT != 0;
        // A box pushed off screen is skipped, never fatal.
        let _ = draw_rect(form.display, &bounds, fill, false);
        Ok(render_str(form, text, px, py)? + 2 * padding)
    } else {
        render_str(form, text, px, py)
    }
}

/// Renders one UTF-32 code point at `(x, y)`; same contract as
/// [`print_str`] for a single character.
pub fn print_codepoint(form: &PrintForm, code: u32, x: i16, y: i16) -> Result<i16, Error> {
    let encoded = encode_utf32(code);
    if encoded.is_empty() {
        return Err(Error::InvalidUtf8);
    }

    if form.config & CFG_BOUNDING_BOX != 0 {
        let bounds = str_rect(form, &encoded, x, y)?;
        let fill = form.config & CFG_INVERT != 0;
        let _ = draw_rect(form.display, &bounds, fill, false);
        Ok(render_str(form, &encoded, x, y)? + 2 * form.padding as i16)
    } else {
        render_str(form, &encoded, x, y)
    }
}

/// Bounding rectangle of one UTF-32 code point printed at `(x, y)`.
pub fn codepoint_rect(form: &PrintForm, code: u32, x: i16, y: i16) -> Result<Rect, Error> {
    let encoded = encode_utf32(code);
    if encoded.is_empty() {
        return Err(Error::InvalidUtf8);
    }
    str_rect(form, &encoded, x, y)
}

fn render_str(form: &PrintForm, text: &[u8], x: i16, y: i16) -> Result<i16, Error> {
    let header = parse_header(form.font)?;
    let use_spacing = form.config & CFG_SPACING != 0;

    let mut px = x;
    let mut py = y;

    let mut pos = 0;
    while pos < text.len() && text[pos] != 0 {
        if text[pos] == b'\n' {
            px = x;
            py -= header.glyph_height as i16 + 1;
            pos += 1;
            continue;
        }

        let (code, len) = decode_utf8(&text[pos..])?;
        pos += len as usize;

        match lookup_glyph(form.font, code) {
            Some(offset) => {
                let (glyph, bitmap) = glyph_at(form.font, offset).ok_or(Error::FontTruncated)?;
                px = draw_glyph(form, &glyph, bitmap, px, py);
                if use_spacing {
                    px += form.spacing as i16;
                }
            }
            None => {
                let side = missing_glyph_side(header.glyph_height);
                if side > 5 {
                    let placeholder =
                        Rect::new(px + 2, py, (side - 4) as u16, side as u16);
                    let _ = draw_rect(form.display, &placeholder, false, false);
                }
                px += side;
            }
        }
    }

    Ok(px)
}
