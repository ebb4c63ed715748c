//! Filled and outlined rectangles with rotation and clipping.

use crate::{DisplayContext, Error, Rect};

/// Draws `rect` after mapping it from logical to physical coordinates.
///
/// The rotation transform is applied once to the whole rectangle, not per
/// pixel. Returns [`Error::OffScreen`] when the rectangle misses the panel
/// entirely; partially visible rectangles are clipped edge by edge, and an
/// outline stroke whose edge was clipped away is not drawn. The written
/// pixel value is `!invert`.
pub fn draw_rect(
    display: &DisplayContext,
    rect: &Rect,
    fill: bool,
    invert: bool,
) -> Result<(), Error> {
    let rotation = display.rotation & 0x03;
    let screen_width = display.width as i16;
    let screen_height = display.height as i16;

    // Odd rotations swap the axes of the whole rectangle.
    let mut physical = if rotation & 0x01 != 0 {
        Rect::new(rect.y, rect.x, rect.height, rect.width)
    } else {
        *rect
    };

    if rotation == 0 || rotation == 3 {
        physical.y = screen_height - (physical.y + physical.height as i16);
    }
    if rotation == 2 || rotation == 3 {
        physical.x = screen_width - (physical.x + physical.width as i16);
    }

    draw_physical(display, &physical, fill, invert)
}

/// Clips and emits an already rotation-adjusted rectangle.
fn draw_physical(
    display: &DisplayContext,
    rect: &Rect,
    fill: bool,
    invert: bool,
) -> Result<(), Error> {
    let screen_width = display.width as i16;
    let screen_height = display.height as i16;

    let mut min_x = rect.x;
    let mut max_x = rect.x + rect.width as i16;
    let mut min_y = rect.y;
    let mut max_y = rect.y + rect.height as i16;

    if (max_x < 0 && min_x < 0) || (max_x > screen_width && min_x > screen_width) {
        return Err(Error::OffScreen);
    }
    if (max_y < 0 && min_y < 0) || (max_y > screen_height && min_y > screen_height) {
        return Err(Error::OffScreen);
    }

    // Track which edges survive clipping; a clipped edge loses its stroke.
    let mut left_edge = true;
    let mut right_edge = true;
    let mut top_edge = true;
    let mut bottom_edge = true;

    if max_x > screen_width {
        max_x = screen_width;
        right_edge = false;
    }
    if min_x < 0 {
        min_x = 0;
        left_edge = false;
    }
    if max_y > screen_height {
        max_y = screen_height;
        top_edge = false;
    }
    if min_y < 0 {
        min_y = 0;
        bottom_edge = false;
    }

    let on = !invert;
    let sink = display.sink;

    if fill {
        for y in min_y..max_y {
            for x in min_x..max_x {
                sink.set_pixel(x as u16, y as u16, on);
            }
        }
        return Ok(());
    }

    if left_edge {
        for y in min_y..max_y {
            sink.set_pixel(min_x as u16, y as u16, on);
        }
    }
    if right_edge {
        for y in min_y..max_y {
            sink.set_pixel((max_x - 1) as u16, y as u16, on);
        }
    }
    if bottom_edge {
        for x in min_x..max_x {
            sink.set_pixel(x as u16, min_y as u16, on);
        }
    }
    if top_edge {
        for x in min_x..max_x {
            sink.set_pixel(x as u16, (max_y - 1) as u16, on);
        }
    }

    Ok(())
}
