//! Logical to physical VRAM address transcoding.
//!
//! The EF9345 addresses its memory as (column X, row Y, block Z). Columns
//! 0-39 and rows 0-31 are folded into 1 KiB per block with the scheme of
//! the datasheet (figure 11, table 2):
//!
//! - Rows 8-31: `b0` on A10, `Y` on A9-A5, `X4 X3` on A4-A3. Columns 32-39
//!   reuse the A4-A3 slots of rows 8-31 with `Y4 Y3` instead, so their
//!   cells land in the space freed by rows 0-7.
//! - Even rows 0-7: `b0` on A10, `X5 X4 X3` on A7-A5.
//! - Odd rows 0-7: A7 set, `/X5 /X4` on A4-A3, and A10 either `X3` (b0 = 0)
//!   or forced high (b0 = 1).
//!
//! `X2 X1 X0` always go straight to A2-A0, and the high block bits go on
//! A13-A11.

use crate::registers::{Registers, R4, R5, R6, R7};

/// Number of character columns.
pub const COLUMNS: u8 = 40;
/// Number of memory rows addressable by the pointers.
pub const ROWS: u8 = 32;
/// First row of the wrapping area (row 0 is the service row, 1-7 are
/// reserved).
pub const FIRST_BULK_ROW: u8 = 8;

/// Transcode (column, row, block bit) into bits A10-A3 of a VRAM address.
///
/// # Panics
///
/// Panics if `x >= 40`, `y >= 32` or `b0 > 1`: these cannot come out of a
/// correctly masked register.
#[must_use]
pub fn transcode(x: u8, y: u8, b0: u8) -> u16 {
    assert!(x < COLUMNS, "EF9345: column {x} out of range");
    assert!(y < ROWS, "EF9345: row {y} out of range");
    assert!(b0 <= 1, "EF9345: block bit {b0} out of range");

    let x = u16::from(x);
    let y = u16::from(y);
    let b0 = u16::from(b0);

    let mut address = 0;
    if y >= u16::from(FIRST_BULK_ROW) {
        address |= b0 << 10;
        if x & 0b10_0000 != 0 {
            address |= (y & 0b111) << 5;
            address |= y & 0b1_1000;
        } else {
            address |= x & 0b1_1000;
            address |= (y & 0b1_1111) << 5;
        }
    } else if y & 1 != 0 {
        address |= 1 << 7;
        address |= (!x & 0b11_0000) >> 1;
        if b0 == 0 {
            address |= (x & 0b1000) << 7;
        } else {
            address |= 1 << 10;
        }
    } else {
        address |= b0 << 10;
        address |= (x & 0b11_1000) << 2;
    }
    address
}

/// Physical address of the main pointer (R6/R7).
///
/// High block bits: b1 (R7 bit 6) on A11, d0 (R6 bit 5) on A12, d1 (R6
/// bit 7) on A13.
#[must_use]
pub fn memory_pointer_address(regs: &Registers) -> u16 {
    let r6 = regs.direct[R6];
    let r7 = regs.direct[R7];
    let x = regs.mp_x();
    let b0 = (r7 & 0x80) >> 7;
    let z = u16::from((r7 & 0x40) >> 6) | u16::from((r6 & 0x20) >> 4) | u16::from((r6 & 0x80) >> 5);
    u16::from(x & 0x07) | transcode(x, regs.mp_y(), b0) | (z << 11)
}

/// Physical address of the auxiliary pointer (R4/R5).
///
/// High block bits: b'1 (R5 bit 6) on A11, d'0 (R4 bit 5) on A12, d'1 (R6
/// bit 6) on A13.
#[must_use]
pub fn aux_pointer_address(regs: &Registers) -> u16 {
    let r4 = regs.direct[R4];
    let r5 = regs.direct[R5];
    let r6 = regs.direct[R6];
    let x = regs.ap_x();
    let b0 = (r5 & 0x80) >> 7;
    let z = u16::from((r5 & 0x40) >> 6) | u16::from((r4 & 0x20) >> 4) | u16::from((r6 & 0x40) >> 4);
    u16::from(x & 0x07) | transcode(x, regs.ap_y(), b0) | (z << 11)
}

/// Physical address of a display cell: column `x`, memory row `y`, 4-bit
/// block `z` (bit 0 is the transcoder's block bit).
#[must_use]
pub fn triplet_address(x: u8, y: u8, z: u8) -> u16 {
    let transcoded = transcode(x & 0x3F, y & 0x1F, z & 1);
    u16::from(x & 0x07) | transcoded | (u16::from(z & 0b1110) << 10)
}

/// Next row in the wrapping area: 31 wraps back to 8, not 0.
#[must_use]
pub const fn next_row(y: u8) -> u8 {
    let y = y + 1;
    if y >= ROWS { y - (ROWS - FIRST_BULK_ROW) } else { y }
}

/// Memory row shown on a screen row. Screen row 0 is the service row
/// (memory row 0); data rows start at the row origin and wrap inside
/// rows 8-31.
#[must_use]
pub fn screen_row_to_memory_row(screen_row: u8, origin_row: u8) -> u8 {
    if screen_row == 0 {
        return 0;
    }
    let mut row = origin_row + screen_row - 1;
    while row >= ROWS {
        row -= ROWS - FIRST_BULK_ROW;
    }
    row
}

/// Increment the main pointer row, keeping R6's mode bits.
pub fn increment_mp_y(regs: &mut Registers) {
    let y = next_row(regs.mp_y());
    regs.direct[R6] = (regs.direct[R6] & 0xE0) | y;
}

/// Increment the main pointer column modulo 40, keeping R7's mode bits.
/// When the column wraps and `wrap_rows` is set, the row moves on too.
pub fn increment_mp_x(regs: &mut Registers, wrap_rows: bool) {
    let x = (regs.mp_x() + 1) % COLUMNS;
    regs.direct[R7] = (regs.direct[R7] & 0xC0) | x;
    if x == 0 && wrap_rows {
        increment_mp_y(regs);
    }
}

/// Increment the auxiliary pointer column modulo 40, keeping R5's mode
/// bits. The auxiliary row never moves.
pub fn increment_ap_x(regs: &mut Registers) {
    let x = (regs.ap_x() + 1) % COLUMNS;
    regs.direct[R5] = (regs.direct[R5] & 0xC0) | x;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transcoded address per row, per 8-column group, for b0 = 0 and 1.
    /// The low three column bits never reach the transcoder.
    #[rustfmt::skip]
    const REFERENCE: [[[u16; 2]; 5]; 32] = [
        [[0x000, 0x400], [0x020, 0x420], [0x040, 0x440], [0x060, 0x460], [0x080, 0x480]],
        [[0x098, 0x498], [0x498, 0x498], [0x090, 0x490], [0x490, 0x490], [0x088, 0x488]],
        [[0x000, 0x400], [0x020, 0x420], [0x040, 0x440], [0x060, 0x460], [0x080, 0x480]],
        [[0x098, 0x498], [0x498, 0x498], [0x090, 0x490], [0x490, 0x490], [0x088, 0x488]],
        [[0x000, 0x400], [0x020, 0x420], [0x040, 0x440], [0x060, 0x460], [0x080, 0x480]],
        [[0x098, 0x498], [0x498, 0x498], [0x090, 0x490], [0x490, 0x490], [0x088, 0x488]],
        [[0x000, 0x400], [0x020, 0x420], [0x040, 0x440], [0x060, 0x460], [0x080, 0x480]],
        [[0x098, 0x498], [0x498, 0x498], [0x090, 0x490], [0x490, 0x490], [0x088, 0x488]],
        [[0x100, 0x500], [0x108, 0x508], [0x110, 0x510], [0x118, 0x518], [0x008, 0x408]],
        [[0x120, 0x520], [0x128, 0x528], [0x130, 0x530], [0x138, 0x538], [0x028, 0x428]],
        [[0x140, 0x540], [0x148, 0x548], [0x150, 0x550], [0x158, 0x558], [0x048, 0x448]],
        [[0x160, 0x560], [0x168, 0x568], [0x170, 0x570], [0x178, 0x578], [0x068, 0x468]],
        [[0x180, 0x580], [0x188, 0x588], [0x190, 0x590], [0x198, 0x598], [0x088, 0x488]],
        [[0x1A0, 0x5A0], [0x1A8, 0x5A8], [0x1B0, 0x5B0], [0x1B8, 0x5B8], [0x0A8, 0x4A8]],
        [[0x1C0, 0x5C0], [0x1C8, 0x5C8], [0x1D0, 0x5D0], [0x1D8, 0x5D8], [0x0C8, 0x4C8]],
        [[0x1E0, 0x5E0], [0x1E8, 0x5E8], [0x1F0, 0x5F0], [0x1F8, 0x5F8], [0x0E8, 0x4E8]],
        [[0x200, 0x600], [0x208, 0x608], [0x210, 0x610], [0x218, 0x618], [0x010, 0x410]],
        [[0x220, 0x620], [0x228, 0x628], [0x230, 0x630], [0x238, 0x638], [0x030, 0x430]],
        [[0x240, 0x640], [0x248, 0x648], [0x250, 0x650], [0x258, 0x658], [0x050, 0x450]],
        [[0x260, 0x660], [0x268, 0x668], [0x270, 0x670], [0x278, 0x678], [0x070, 0x470]],
        [[0x280, 0x680], [0x288, 0x688], [0x290, 0x690], [0x298, 0x698], [0x090, 0x490]],
        [[0x2A0, 0x6A0], [0x2A8, 0x6A8], [0x2B0, 0x6B0], [0x2B8, 0x6B8], [0x0B0, 0x4B0]],
        [[0x2C0, 0x6C0], [0x2C8, 0x6C8], [0x2D0, 0x6D0], [0x2D8, 0x6D8], [0x0D0, 0x4D0]],
        [[0x2E0, 0x6E0], [0x2E8, 0x6E8], [0x2F0, 0x6F0], [0x2F8, 0x6F8], [0x0F0, 0x4F0]],
        [[0x300, 0x700], [0x308, 0x708], [0x310, 0x710], [0x318, 0x718], [0x018, 0x418]],
        [[0x320, 0x720], [0x328, 0x728], [0x330, 0x730], [0x338, 0x738], [0x038, 0x438]],
        [[0x340, 0x740], [0x348, 0x748], [0x350, 0x750], [0x358, 0x758], [0x058, 0x458]],
        [[0x360, 0x760], [0x368, 0x768], [0x370, 0x770], [0x378, 0x778], [0x078, 0x478]],
        [[0x380, 0x780], [0x388, 0x788], [0x390, 0x790], [0x398, 0x798], [0x098, 0x498]],
        [[0x3A0, 0x7A0], [0x3A8, 0x7A8], [0x3B0, 0x7B0], [0x3B8, 0x7B8], [0x0B8, 0x4B8]],
        [[0x3C0, 0x7C0], [0x3C8, 0x7C8], [0x3D0, 0x7D0], [0x3D8, 0x7D8], [0x0D8, 0x4D8]],
        [[0x3E0, 0x7E0], [0x3E8, 0x7E8], [0x3F0, 0x7F0], [0x3F8, 0x7F8], [0x0F8, 0x4F8]],
    ];

    #[test]
    fn every_cell_matches_reference_table() {
        for y in 0..ROWS {
            for x in 0..COLUMNS {
                for b0 in 0..2 {
                    let expected = REFERENCE[usize::from(y)][usize::from(x / 8)][usize::from(b0)];
                    assert_eq!(transcode(x, y, b0), expected, "x {x} y {y} b0 {b0}");
                }
            }
        }
    }

    #[test]
    fn bulk_rows_low_columns() {
        // Y=8, X=0..7 -> A5 set, block bit on A10.
        assert_eq!(transcode(0, 8, 0), 0x100);
        assert_eq!(transcode(0, 8, 1), 0x500);
        assert_eq!(transcode(8, 8, 0), 0x108);
        assert_eq!(transcode(31, 31, 0), 0x3F8);
    }

    #[test]
    fn bulk_rows_high_columns_reuse_low_row_space() {
        // X>=32: Y2-Y0 on A7-A5, Y4 Y3 on A4-A3.
        assert_eq!(transcode(32, 8, 0), 0x08);
        assert_eq!(transcode(39, 31, 1), 0x400 | 0xE0 | 0x18);
    }

    #[test]
    fn even_service_rows() {
        assert_eq!(transcode(0, 0, 0), 0);
        assert_eq!(transcode(39, 0, 0), 0x80);
        assert_eq!(transcode(24, 2, 1), 0x400 | 0x60);
    }

    #[test]
    fn odd_service_rows() {
        // X=0: /X5 /X4 = 11 on A4-A3, A7 set.
        assert_eq!(transcode(0, 1, 0), 0x80 | 0x18);
        assert_eq!(transcode(8, 1, 0), 0x400 | 0x80 | 0x18);
        assert_eq!(transcode(0, 1, 1), 0x400 | 0x80 | 0x18);
        assert_eq!(transcode(32, 7, 0), 0x80 | 0x08);
    }

    #[test]
    #[should_panic(expected = "column 40 out of range")]
    fn column_out_of_range_fails_fast() {
        let _ = transcode(40, 8, 0);
    }

    #[test]
    fn memory_pointer_high_bits() {
        let mut regs = Registers::default();
        regs.direct[R6] = 0x20 | 8; // d0
        regs.direct[R7] = 0x40 | 5; // b1
        assert_eq!(memory_pointer_address(&regs), 0x1800 | 0x100 | 5);
    }

    #[test]
    fn aux_pointer_uses_r6_bit6() {
        let mut regs = Registers::default();
        regs.direct[R4] = 8;
        regs.direct[R5] = 2;
        regs.direct[R6] = 0x40;
        assert_eq!(aux_pointer_address(&regs), 0x2000 | 0x100 | 2);
    }

    #[test]
    fn triplet_block_bits() {
        assert_eq!(triplet_address(1, 8, 0b0010), 0x0800 | 0x100 | 1);
        assert_eq!(triplet_address(1, 8, 0b0011), 0x0C00 | 0x100 | 1);
    }

    #[test]
    fn row_wraps_31_to_8() {
        assert_eq!(next_row(8), 9);
        assert_eq!(next_row(31), 8);
        assert_eq!(next_row(0), 1);
    }

    #[test]
    fn forty_column_increments_wrap_one_row() {
        let mut regs = Registers::default();
        regs.direct[R6] = 0xA0 | 31;
        regs.direct[R7] = 0x80 | 12;
        for _ in 0..40 {
            increment_mp_x(&mut regs, true);
        }
        assert_eq!(regs.direct[R7], 0x80 | 12);
        assert_eq!(regs.direct[R6], 0xA0 | 8);
    }

    #[test]
    fn column_increment_without_row_wrap() {
        let mut regs = Registers::default();
        regs.direct[R6] = 10;
        regs.direct[R7] = 39;
        increment_mp_x(&mut regs, false);
        assert_eq!(regs.mp_x(), 0);
        assert_eq!(regs.mp_y(), 10);
    }

    #[test]
    fn aux_increment_touches_r5_only() {
        let mut regs = Registers::default();
        regs.direct[R5] = 0xC0 | 39;
        regs.direct[R7] = 7;
        increment_ap_x(&mut regs);
        assert_eq!(regs.direct[R5], 0xC0);
        assert_eq!(regs.direct[R7], 7);
    }

    #[test]
    fn screen_rows_follow_origin() {
        assert_eq!(screen_row_to_memory_row(0, 20), 0);
        assert_eq!(screen_row_to_memory_row(1, 8), 8);
        assert_eq!(screen_row_to_memory_row(24, 8), 31);
        assert_eq!(screen_row_to_memory_row(5, 30), 10);
    }
}
