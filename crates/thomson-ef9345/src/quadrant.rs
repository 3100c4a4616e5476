//! Double width / double height quadrant assignment.
//!
//! A double-size glyph covers two columns and two character rows; each
//! cell it spans shows one quadrant of it:
//!
//! ```text
//!   normal  0
//!   width   1 2
//!   height  4
//!           8
//!   size    5 6
//!           9 A
//! ```
//!
//! Bit 0/1 select the left/right half, bit 2/3 the top/bottom half.

use crate::row::RowBuffer;
use crate::transcode::COLUMNS;

pub const NORMAL: u8 = 0x0;
pub const WIDTH_LEFT: u8 = 0x1;
pub const WIDTH_RIGHT: u8 = 0x2;
pub const HEIGHT_TOP: u8 = 0x4;
pub const HEIGHT_BOTTOM: u8 = 0x8;
pub const SIZE_TOP_LEFT: u8 = 0x5;
pub const SIZE_TOP_RIGHT: u8 = 0x6;
pub const SIZE_BOTTOM_LEFT: u8 = 0x9;
pub const SIZE_BOTTOM_RIGHT: u8 = 0xA;

/// Quadrant of each column; holds the previous row's assignment until
/// resolved again.
pub type QuadrantBuffer = [u8; COLUMNS as usize];

/// Resolve the quadrants of a freshly loaded row, left to right.
///
/// On entry `quadrants` holds the row above, which decides whether a
/// double-height cell is a top or a bottom half. Each column then looks at
/// the already resolved column to its left to pair up double-width halves.
pub fn resolve_quadrants(quadrants: &mut QuadrantBuffer, row: &RowBuffer) {
    for x in 0..quadrants.len() {
        let cell = row[x];
        let double_height = cell.double_height();
        let double_width = cell.double_width();
        let double_size = double_height && double_width;
        let above = quadrants[x];
        let left = if x > 0 { Some(quadrants[x - 1]) } else { None };

        let quadrant = match left {
            Some(SIZE_TOP_LEFT) if double_size => SIZE_TOP_RIGHT,
            Some(SIZE_BOTTOM_LEFT) if double_size => SIZE_BOTTOM_RIGHT,
            Some(WIDTH_LEFT) if double_width => WIDTH_RIGHT,
            _ if double_height && above == HEIGHT_TOP => HEIGHT_BOTTOM,
            _ if double_size && above == SIZE_TOP_LEFT => SIZE_BOTTOM_LEFT,
            _ if double_size => SIZE_TOP_LEFT,
            _ if double_width => WIDTH_LEFT,
            _ if double_height => HEIGHT_TOP,
            _ => NORMAL,
        };
        quadrants[x] = quadrant;
    }
}
