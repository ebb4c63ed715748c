//! Prints layout measurements for a multi-line string without rendering:
//! `cargo run --example measure`.

use c8_font::{
    codepoint_rect, str_rect, str_width, validate_font, DisplayContext, PixelSink, PrintForm,
    CFG_DEFAULT, CFG_SPACING,
};

struct NullSink;

impl PixelSink for NullSink {
    fn set_pixel(&self, _x: u16, _y: u16, _on: bool) {}
}

/// Single-glyph font: a solid 4x6 block mapped to 'H', glyph height 6.
fn demo_font() -> Vec<u8> {
    let mut font = vec![0xC8, 0x05, 6, 0x01, 0x00];
    font.extend_from_slice(&('H' as u32).to_le_bytes());
    font.extend_from_slice(&11u16.to_le_bytes());
    font.extend_from_slice(&[4, 6, 6, 0, 5]);
    font.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
    font
}

fn main() {
    let font = demo_font();
    validate_font(&font).unwrap();

    let sink = NullSink;
    let display = DisplayContext {
        width: 128,
        height: 64,
        rotation: 0,
        sink: &sink,
    };
    let mut form = PrintForm {
        font: &font,
        display: &display,
        config: CFG_DEFAULT,
        spacing: 0,
        padding: 0,
    };

    // 'Z' is unmapped and measures as the placeholder square.
    for text in [&b"HH"[..], b"HH\nHHH", b"HZH"] {
        let rect = str_rect(&form, text, 0, 0).unwrap();
        let width = str_width(&form, text).unwrap();
        println!("{:?} -> {rect:?} (width {width})", core::str::from_utf8(text).unwrap());
    }

    form.config = CFG_SPACING;
    form.spacing = 2;
    println!(
        "with spacing 2: width {}",
        str_width(&form, b"HH").unwrap()
    );

    println!(
        "single code point: {:?}",
        codepoint_rect(&form, 'H' as u32, 0, 0).unwrap()
    );
}
