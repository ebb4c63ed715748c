//! Glyph rasterization with screen-rotation transforms.

use crate::font::GlyphHeader;
use crate::{PrintForm, CFG_INVERT};

/// Reads one bit from a packed MSB-first bitmap. Reads past the end count as
/// background, so a short bitmap degrades to blank pixels.
fn get_bit(bitmap: &[u8], index: usize) -> bool {
    bitmap
        .get(index >> 3)
        .map_or(false, |byte| byte & (0x80 >> (index & 7)) != 0)
}

/// Draws one decoded glyph at the cursor and returns the next cursor x.
///
/// Clipping is a whole-footprint test only: a glyph that merely straddles a
/// screen edge is emitted in full and the sink drops the out-of-range
/// writes. A fully off-screen glyph emits nothing but still advances the
/// cursor normally, so layout is unaffected by visibility.
pub(crate) fn draw_glyph(
    form: &PrintForm,
    glyph: &GlyphHeader,
    bitmap: &[u8],
    cx: i16,
    cy: i16,
) -> i16 {
    let invert = form.config & CFG_INVERT != 0;
    let display = form.display;
    let rotation = display.rotation & 0x03;

    // Odd rotations map the logical axes onto swapped panel extents.
    let (screen_width, screen_height) = if rotation & 0x01 != 0 {
        (display.height as i16, display.width as i16)
    } else {
        (display.width as i16, display.height as i16)
    };

    let reverse_x = rotation == 2 || rotation == 3;
    let reverse_y = rotation == 0 || rotation == 3;

    let cx = cx + glyph.left as i16;
    let width = glyph.width as i16;
    let height = glyph.height as i16;

    let (min_x, max_x) = if reverse_x {
        let rx = screen_width - cx;
        (rx - width, rx)
    } else {
        (cx, cx + width)
    };

    let glyph_top = height - glyph.top as i16;
    let (min_y, max_y) = if reverse_y {
        let ry = screen_height - cy + glyph_top;
        (ry - height, ry)
    } else {
        let ry = cy - glyph_top;
        (ry, ry + height)
    };

    // Wide icon glyphs may exceed their declared advance; never under-step.
    let next_x = cx + (glyph.advance as i16).max(width);

    if (max_x < 0 && min_x < 0) || (max_x > screen_width && min_x > screen_width) {
        return next_x;
    }
    if (max_y < 0 && min_y < 0) || (max_y > screen_height && min_y > screen_height) {
        return next_x;
    }

    for y in min_y..max_y {
        let row = if reverse_y {
            (y - min_y) as usize
        } else {
            (max_y - y - 1) as usize
        };
        for x in min_x..max_x {
            let col = if reverse_x {
                (max_x - x - 1) as usize
            } else {
                (x - min_x) as usize
            };

            let mut on = get_bit(bitmap, row * glyph.width as usize + col);
            if invert {
                on = !on;
            }
            // Background stays transparent so neighboring glyphs can
            // overlap without erasing each other.
            if !on && !invert {
                continue;
            }

            if rotation & 0x01 != 0 {
                display.sink.set_pixel(y as u16, x as u16, on);
            } else {
                display.sink.set_pixel(x as u16, y as u16, on);
            }
        }
    }

    next_x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{build_font, pattern_bitmap, CapturePixels, GlyphSpec};
    use crate::{DisplayContext, CFG_DEFAULT};
    use std::vec::Vec;

    const A_PATTERN: [&str; 7] = [
        "..X..", //
        ".X.X.", //
        "X...X", //
        "X...X", //
        "XXXXX", //
        "X...X", //
        "X...X", //
    ];

    fn font_with_a() -> Vec<u8> {
        build_font(
            7,
            &[GlyphSpec {
                code: 'A' as u32,
                width: 5,
                height: 7,
                top: 7,
                left: 0,
                advance: 6,
                bitmap: pattern_bitmap(&A_PATTERN),
            }],
        )
    }

    fn draw_on(
        font: &[u8],
        sink: &CapturePixels,
        width: u16,
        height: u16,
        rotation: u8,
        config: u8,
        cx: i16,
        cy: i16,
    ) -> i16 {
        let display = DisplayContext {
            width,
            height,
            rotation,
            sink,
        };
        let form = PrintForm {
            font,
            display: &display,
            config,
            spacing: 0,
            padding: 0,
        };
        let offset = crate::font::lookup_glyph(font, 'A' as u32).unwrap();
        let (glyph, bitmap) = crate::font::glyph_at(font, offset).unwrap();
        draw_glyph(&form, &glyph, bitmap, cx, cy)
    }

    #[test]
    fn rotation_0_lights_exact_bitmap_rows() {
        let font = font_with_a();
        let sink = CapturePixels::new();
        let next = draw_on(&font, &sink, 128, 64, 0, CFG_DEFAULT, 0, 0);
        assert_eq!(next, 6);

        // Rotation 0 reverses y: bitmap row 0 lands on screen row 57.
        let mut expected = Vec::new();
        for (row, line) in A_PATTERN.iter().enumerate() {
            for (col, cell) in line.bytes().enumerate() {
                if cell == b'X' {
                    expected.push((col as u16, 57 + row as u16));
                }
            }
        }
        expected.sort_unstable();
        assert_eq!(sink.lit_sorted(), expected);
    }

    #[test]
    fn advance_never_undercuts_bitmap_width() {
        let font = build_font(
            7,
            &[GlyphSpec {
                code: 'A' as u32,
                width: 5,
                height: 7,
                top: 7,
                left: 0,
                advance: 3, // narrower than the bitmap
                bitmap: pattern_bitmap(&A_PATTERN),
            }],
        );
        let sink = CapturePixels::new();
        let next = draw_on(&font, &sink, 128, 64, 0, CFG_DEFAULT, 10, 0);
        assert_eq!(next, 15);
    }

    #[test]
    fn fully_off_screen_glyph_emits_nothing_but_advances() {
        let font = font_with_a();
        let sink = CapturePixels::new();
        let next = draw_on(&font, &sink, 128, 64, 0, CFG_DEFAULT, 300, 0);
        assert_eq!(sink.write_count(), 0);

        let on_screen = CapturePixels::new();
        let reference = draw_on(&font, &on_screen, 128, 64, 0, CFG_DEFAULT, 0, 0);
        assert!(on_screen.write_count() > 0);
        assert_eq!(next - 300, reference - 0);
    }

    #[test]
    fn rotation_2_is_point_reflection_of_rotation_0() {
        let font = font_with_a();

        let zero = CapturePixels::new();
        draw_on(&font, &zero, 16, 16, 0, CFG_DEFAULT, 2, 3);

        let half_turn = CapturePixels::new();
        draw_on(&font, &half_turn, 16, 16, 2, CFG_DEFAULT, 2, 3);

        let mut reflected: Vec<(u16, u16)> = zero
            .lit_sorted()
            .into_iter()
            .map(|(x, y)| (15 - x, 15 - y))
            .collect();
        reflected.sort_unstable();
        assert_eq!(half_turn.lit_sorted(), reflected);
    }

    #[test]
    fn rotation_3_is_point_reflection_of_rotation_1() {
        let font = font_with_a();

        let quarter = CapturePixels::new();
        draw_on(&font, &quarter, 16, 8, 1, CFG_DEFAULT, 2, 3);

        let three_quarter = CapturePixels::new();
        draw_on(&font, &three_quarter, 16, 8, 3, CFG_DEFAULT, 2, 3);

        let mut reflected: Vec<(u16, u16)> = quarter
            .lit_sorted()
            .into_iter()
            .map(|(x, y)| (15 - x, 7 - y))
            .collect();
        reflected.sort_unstable();
        assert!(!reflected.is_empty());
        assert_eq!(three_quarter.lit_sorted(), reflected);
    }

    #[test]
    fn odd_rotation_swaps_emitted_axes() {
        // 2x2 solid glyph with top == height renders at (cy..cy+2, cx..cx+2)
        // under rotation 1, emitted with x and y swapped.
        let font = build_font(
            2,
            &[GlyphSpec {
                code: 'A' as u32,
                width: 2,
                height: 2,
                top: 2,
                left: 0,
                advance: 2,
                bitmap: std::vec![0xF0],
            }],
        );
        let sink = CapturePixels::new();
        let next = draw_on(&font, &sink, 16, 8, 1, CFG_DEFAULT, 0, 2);
        assert_eq!(next, 2);
        assert_eq!(sink.lit_sorted(), std::vec![(2, 0), (2, 1), (3, 0), (3, 1)]);
    }

    #[test]
    fn invert_writes_background_pixels_too() {
        let font = font_with_a();
        let sink = CapturePixels::new();
        draw_on(&font, &sink, 128, 64, 0, CFG_INVERT, 0, 0);

        // Every footprint pixel is written; glyph bits go dark.
        assert_eq!(sink.write_count(), 5 * 7);
        let lit = sink.lit_sorted();
        assert_eq!(lit.len(), 35 - A_PATTERN.iter().map(|l| l.matches('X').count()).sum::<usize>());
        assert!(!lit.contains(&(2, 57))); // the 'A' apex is a glyph bit
    }
}
