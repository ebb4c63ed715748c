//! UTF-8 <-> UTF-32 conversion.
//!
//! The decoder accepts the historically extended 5- and 6-byte sequences on
//! purpose: C8 fonts may map private-use code points that only those forms
//! can carry. A NUL byte inside a multi-byte sequence is treated as a
//! premature terminator and rejected.

use heapless::Vec;

use crate::Error;

/// Lead-byte masks for 6..2 byte sequences, longest form first.
const LEAD_MASKS: [u8; 5] = [0xFE, 0xFC, 0xF8, 0xF0, 0xE0];
/// Expected lead-byte patterns matching `LEAD_MASKS`.
const LEAD_BITS: [u8; 5] = [0xFC, 0xF8, 0xF0, 0xE0, 0xC0];

/// Decodes one code point starting at `input[0]`.
///
/// Returns the code point and the number of bytes consumed (1..=6). Fails on
/// an unrecognized lead byte, a continuation byte not matching `10xxxxxx`,
/// or the input ending mid-sequence.
pub fn decode_utf8(input: &[u8]) -> Result<(u32, u8), Error> {
    let lead = *input.first().ok_or(Error::InvalidUtf8)?;
    if lead < 0x80 {
        return Ok((lead as u32, 1));
    }

    let mut continuations = 0usize;
    let mut code = 0u32;
    for (i, (&mask, &bits)) in LEAD_MASKS.iter().zip(&LEAD_BITS).enumerate() {
        if lead & mask == bits {
            continuations = 5 - i;
            code = (lead & (0xFF >> (7 - i))) as u32;
            break;
        }
    }
    if continuations == 0 {
        return Err(Error::InvalidUtf8);
    }
    if input.len() <= continuations {
        return Err(Error::InvalidUtf8);
    }

    for &byte in &input[1..=continuations] {
        if byte == 0 || byte & 0xC0 != 0x80 {
            return Err(Error::InvalidUtf8);
        }
        code = (code << 6) | (byte & 0x3F) as u32;
    }

    Ok((code, continuations as u8 + 1))
}

/// Encodes a UTF-32 code point as UTF-8, up to six bytes.
///
/// Code point 0 is the reserved "no character" sentinel and yields an empty
/// buffer, as do values at or above the 6-byte ceiling (`0x8000_0000`).
pub fn encode_utf32(code: u32) -> Vec<u8, 6> {
    let mut out = Vec::new();
    if code == 0 {
        return out;
    }

    if code < 0x80 {
        let _ = out.push(code as u8);
    } else if code < 0x800 {
        let _ = out.push(0xC0 | ((code >> 6) & 0x1F) as u8);
        let _ = out.push(continuation(code, 0));
    } else if code < 0x10000 {
        let _ = out.push(0xE0 | ((code >> 12) & 0x0F) as u8);
        let _ = out.push(continuation(code, 6));
        let _ = out.push(continuation(code, 0));
    } else if code < 0x200000 {
        let _ = out.push(0xF0 | ((code >> 18) & 0x07) as u8);
        let _ = out.push(continuation(code, 12));
        let _ = out.push(continuation(code, 6));
        let _ = out.push(continuation(code, 0));
    } else if code < 0x4000000 {
        let _ = out.push(0xF8 | ((code >> 24) & 0x03) as u8);
        let _ = out.push(continuation(code, 18));
        let _ = out.push(continuation(code, 12));
        let _ = out.push(continuation(code, 6));
        let _ = out.push(continuation(code, 0));
    } else if code < 0x8000_0000 {
        let _ = out.push(0xFC | ((code >> 30) & 0x01) as u8);
        let _ = out.push(continuation(code, 24));
        let _ = out.push(continuation(code, 18));
        let _ = out.push(continuation(code, 12));
        let _ = out.push(continuation(code, 6));
        let _ = out.push(continuation(code, 0));
    }

    out
}

fn continuation(code: u32, shift: u32) -> u8 {
    0x80 | ((code >> shift) & 0x3F) as u8
}
