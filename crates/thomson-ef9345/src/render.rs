//! Character cell rendering, one 8-pixel column slice per call.

use crate::memory::CharsetMemory;
use crate::quadrant::{HEIGHT_BOTTOM, HEIGHT_TOP, WIDTH_RIGHT};
use crate::row::Triplet;

/// Display lines per character row.
pub const CELL_HEIGHT: u16 = 10;
/// Pixels per character column.
pub const CELL_WIDTH: usize = 8;

/// Alphanumeric glyphs start here in the charset ROM.
const ALPHA_BASE: u16 = 0x0800;

/// Charset ROM address of one glyph slice.
///
/// Glyphs are interleaved by four: `c & 3` picks the byte lane, `c >> 2`
/// the 64-byte group, and each slice of the glyph is four bytes further.
#[must_use]
pub fn slice_address(glyph: u8, slice: u16) -> u16 {
    let glyph = u16::from(glyph & 0x7F);
    ALPHA_BASE + (glyph >> 2) * 0x40 + (glyph & 0x03) + slice * 4
}

/// Render one 8-pixel slice of a 40 column alphanumeric cell.
///
/// `row_line` is the display line within the 10-line cell. Glyph 0 is
/// blank and renders as background. Double-height quadrants stretch each
/// slice over two lines (the bottom quadrant starting at slice 5);
/// double-width quadrants draw four bits, each two pixels wide, from the
/// low (left) or high (right) nibble. The cursor inverts the slice.
pub fn render_alpha_column(
    pixels: &mut [u8],
    cell: Triplet,
    quadrant: u8,
    row_line: u16,
    charset: &CharsetMemory,
    cursor: bool,
) {
    let background = cell.background();
    let foreground = cell.foreground();

    let glyph = cell.glyph();
    if glyph == 0 {
        pixels.fill(background);
        return;
    }

    let stretch = if quadrant & (HEIGHT_TOP | HEIGHT_BOTTOM) != 0 { 2 } else { 1 };
    let offset = if quadrant & HEIGHT_BOTTOM != 0 { CELL_HEIGHT / 2 } else { 0 };
    let slice = row_line / stretch + offset;

    let mut bits = charset.read(slice_address(glyph, slice));
    if cursor {
        bits = !bits;
    }

    if quadrant & 0x03 != 0 {
        if quadrant & WIDTH_RIGHT != 0 {
            bits >>= 4;
        }
        for pair in pixels.chunks_exact_mut(2) {
            pair.fill(if bits & 1 != 0 { foreground } else { background });
            bits >>= 1;
        }
    } else {
        for pixel in pixels.iter_mut() {
            *pixel = if bits & 1 != 0 { foreground } else { background };
            bits >>= 1;
        }
    }
}
