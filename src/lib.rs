#![no_std]

//! Text renderer for the compact C8 binary font format.
//!
//! A C8 blob is a read-only byte array holding a 5-byte header, a character
//! map from UTF-32 codes to glyph offsets, and packed 1-bpp glyph bitmaps.
//! This crate decodes UTF-8 input, looks glyphs up in the map and rasterizes
//! them through a caller-supplied pixel sink, handling the four screen
//! rotations, whole-glyph clipping and multi-line bounding boxes. There is no
//! heap use and no global state; everything is a pure function of the blob,
//! the display context and the print form.

#[cfg(test)]
extern crate std;

pub mod font;
pub mod layout;
mod raster;
pub mod rect;
pub mod utf8;

#[cfg(test)]
pub(crate) mod testutil;

pub use font::{glyph_at, lookup_glyph, parse_header, validate_font, FontHeader, GlyphHeader};
pub use layout::{codepoint_rect, print_codepoint, print_str, str_rect, str_width};
pub use rect::draw_rect;
pub use utf8::{decode_utf8, encode_utf32};

/// C8 blob signature byte.
pub const FONT_SIGNATURE: u8 = 0xC8;
/// Header length of the supported format revision.
pub const FONT_HEADER_LEN: u8 = 0x05;
/// Bytes per character-map entry: UTF-32 code (4) + glyph offset (2).
pub const CMAP_ENTRY_LEN: usize = 6;

/// Insert `PrintForm::spacing` of extra advance after every glyph.
pub const CFG_SPACING: u8 = 0x40;
/// Flip pixel polarity; backgrounds are written instead of skipped.
pub const CFG_INVERT: u8 = 0x20;
/// Draw the text bounding box before the text itself.
pub const CFG_BOUNDING_BOX: u8 = 0x10;
/// No extra behavior.
pub const CFG_DEFAULT: u8 = 0x00;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Font blob is empty.
    FontEmpty,
    /// First byte is not the C8 signature.
    BadSignature(u8),
    /// Header length field disagrees with the supported format revision.
    BadHeaderLen(u8),
    /// Blob ends before the structure its header implies.
    FontTruncated,
    /// Character-map offset at this entry index moves backwards.
    NonMonotonicOffset(u16),
    /// Invalid UTF-8 byte sequence, or the text ended mid-sequence.
    InvalidUtf8,
    /// Primitive lies entirely outside the visible area.
    OffScreen,
}

/// Pixel-write port supplied by the display driver.
///
/// The engine never reads pixels back and performs only whole-footprint
/// clipping, so implementations must silently ignore coordinates outside the
/// panel. The `&self` receiver keeps [`PrintForm`] freely copyable;
/// framebuffer-backed sinks use interior mutability, hardware-backed sinks
/// write registers directly.
pub trait PixelSink {
    fn set_pixel(&self, x: u16, y: u16, on: bool);
}

/// Display properties as the panel reports them, before rotation.
pub struct DisplayContext<'a> {
    /// Panel width in pixels, pre-rotation.
    pub width: u16,
    /// Panel height in pixels, pre-rotation.
    pub height: u16,
    /// Screen orientation 0-3 for 0/90/180/270 degrees.
    pub rotation: u8,
    /// Pixel write port, usually backed by the driver's framebuffer.
    pub sink: &'a dyn PixelSink,
}

/// Everything one print call needs: font, target display and text options.
///
/// Holds only borrows and is cheap to copy, so it is typically built on the
/// stack per draw call or per screen.
#[derive(Clone, Copy)]
pub struct PrintForm<'a> {
    /// C8 font blob.
    pub font: &'a [u8],
    /// Target display.
    pub display: &'a DisplayContext<'a>,
    /// Bit flags: [`CFG_SPACING`], [`CFG_INVERT`], [`CFG_BOUNDING_BOX`].
    pub config: u8,
    /// Extra advance between glyphs, applied when `CFG_SPACING` is set.
    pub spacing: i8,
    /// Uniform margin between the text and its bounding box.
    pub padding: i8,
}

/// Axis-aligned rectangle in the caller's logical coordinate space.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
