//! Renders a short string into an in-memory framebuffer and dumps it as
//! ASCII art: `cargo run --example banner`.

use std::cell::RefCell;

use c8_font::{print_str, validate_font, DisplayContext, PixelSink, PrintForm, CFG_DEFAULT};

struct Framebuffer {
    width: u16,
    height: u16,
    pixels: RefCell<Vec<bool>>,
}

impl Framebuffer {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: RefCell::new(vec![false; width as usize * height as usize]),
        }
    }

    fn dump(&self) {
        let pixels = self.pixels.borrow();
        for y in 0..self.height {
            let line: String = (0..self.width)
                .map(|x| {
                    if pixels[y as usize * self.width as usize + x as usize] {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            println!("{line}");
        }
    }
}

impl PixelSink for Framebuffer {
    fn set_pixel(&self, x: u16, y: u16, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels.borrow_mut()[y as usize * self.width as usize + x as usize] = on;
    }
}

fn pack(rows: &[&str]) -> Vec<u8> {
    let width = rows[0].len();
    let mut bitmap = vec![0u8; (width * rows.len() + 7) / 8];
    for (row, line) in rows.iter().enumerate() {
        for (col, cell) in line.bytes().enumerate() {
            if cell == b'#' {
                let index = row * width + col;
                bitmap[index >> 3] |= 0x80 >> (index & 7);
            }
        }
    }
    bitmap
}

/// Two-glyph demo font: 'H' and 'I', 5x7, advance 6.
fn demo_font() -> Vec<u8> {
    let glyphs = [
        ('H', pack(&["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"])),
        ('I', pack(&["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "#####"])),
    ];

    let mut font = vec![0xC8, 0x05, 7];
    font.extend_from_slice(&(glyphs.len() as u16).to_le_bytes());
    let mut offset = 5 + glyphs.len() * 6;
    let mut records = Vec::new();
    for (code, bitmap) in &glyphs {
        font.extend_from_slice(&(*code as u32).to_le_bytes());
        font.extend_from_slice(&(offset as u16).to_le_bytes());
        records.extend_from_slice(&[5, 7, 7, 0, 6]);
        records.extend_from_slice(bitmap);
        offset += 5 + bitmap.len();
    }
    font.extend_from_slice(&records);
    font
}

fn main() {
    let font = demo_font();
    validate_font(&font).unwrap();

    let frame = Framebuffer::new(24, 10);
    let display = DisplayContext {
        width: 24,
        height: 10,
        rotation: 0,
        sink: &frame,
    };
    let form = PrintForm {
        font: &font,
        display: &display,
        config: CFG_DEFAULT,
        spacing: 0,
        padding: 0,
    };

    let next_x = print_str(&form, b"HI", 1, 1).unwrap();
    frame.dump();
    println!("cursor after print: {next_x}");
}
