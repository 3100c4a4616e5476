//! Character row loading.
//!
//! At the start of each character row the chip fetches the 40 cells of the
//! row from VRAM into an internal buffer of (A, B, C) triplets, in the 40
//! column long code layout, whatever the character code stored in memory:
//!
//! | Byte | Bits                                                       |
//! |------|------------------------------------------------------------|
//! | A    | 7 negative, 6-4 foreground, 3 flash, 2-0 background        |
//! | B    | 7 in RAM, 6-4 set (graphics), 5 set (DEL), 4 underline, 3 double width, 2 conceal, 1 double height, 0 insert |
//! | C    | character code (0 is blank)                                |

use crate::command::PLANE_OFFSET;
use crate::memory::VideoMemory;
use crate::registers::DisplayConfig;
use crate::transcode::{screen_row_to_memory_row, triplet_address, COLUMNS};

/// B' pattern (top three bits) marking a short code control cell.
const DEL_MASK: u8 = 0b1110_0000;
const DEL_PATTERN: u8 = 0b1000_0000;

/// B flag bits of the long code layout.
pub const B_IN_RAM: u8 = 0x80;
pub const B_DEL: u8 = 0x20;
pub const B_UNDERLINE: u8 = 0x10;
pub const B_DOUBLE_WIDTH: u8 = 0x08;
pub const B_CONCEAL: u8 = 0x04;
pub const B_DOUBLE_HEIGHT: u8 = 0x02;
pub const B_INSERT: u8 = 0x01;

/// Character code selected by TGS bits 7-6 and PAT bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharCode {
    /// 40 columns, 24 bits per cell.
    Long40,
    /// 40 columns, variable.
    Variable40,
    /// 80 columns, 8 bits per cell.
    Short80,
    /// 80 columns, 12 bits per cell.
    Long80,
    /// 40 columns, 16 bits per cell.
    Short40,
}

impl CharCode {
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(CharCode::Long40),
            1 => Some(CharCode::Variable40),
            2 => Some(CharCode::Short80),
            3 => Some(CharCode::Long80),
            4 => Some(CharCode::Short40),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CharCode::Long40 => "40 long",
            CharCode::Variable40 => "40 variable",
            CharCode::Short80 => "80 short",
            CharCode::Long80 => "80 long",
            CharCode::Short40 => "40 short",
        }
    }
}

/// One decoded cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triplet {
    pub a: u8,
    pub b: u8,
    pub c: u8,
}

impl Triplet {
    #[must_use]
    pub const fn background(self) -> u8 {
        self.a & 0x07
    }

    #[must_use]
    pub const fn foreground(self) -> u8 {
        (self.a & 0x70) >> 4
    }

    #[must_use]
    pub const fn glyph(self) -> u8 {
        self.c & 0x7F
    }

    #[must_use]
    pub const fn double_width(self) -> bool {
        self.b & B_DOUBLE_WIDTH != 0
    }

    #[must_use]
    pub const fn double_height(self) -> bool {
        self.b & B_DOUBLE_HEIGHT != 0
    }
}

pub type RowBuffer = [Triplet; COLUMNS as usize];

/// Load screen row `screen_row` (0 = service row) with the configured
/// character code.
///
/// # Panics
///
/// Panics if the character code has no decoder: the 40 variable, 80 short
/// and 80 long codes are not implemented, and selector values 5-7 do not
/// exist.
pub fn load_row(row: &mut RowBuffer, vram: &VideoMemory, display: &DisplayConfig, screen_row: u8) {
    let memory_row = screen_row_to_memory_row(screen_row, display.origin_row);
    match display.char_code() {
        Some(CharCode::Long40) => load_row_40_long(row, vram, memory_row, display.block_origin),
        Some(CharCode::Short40) => load_row_40_short(row, vram, memory_row, display.block_origin),
        Some(code) => unimplemented!("EF9345: {} character code not implemented", code.name()),
        None => panic!("EF9345: unknown character code {}", display.char_code),
    }
}

/// 40 column long code: C, B and A stored as-is on three planes.
pub fn load_row_40_long(row: &mut RowBuffer, vram: &VideoMemory, memory_row: u8, block: u8) {
    for (x, cell) in (0..COLUMNS).zip(row.iter_mut()) {
        let address = triplet_address(x, memory_row, block);
        *cell = Triplet {
            c: vram.read(address),
            b: vram.read(address.wrapping_add(PLANE_OFFSET)),
            a: vram.read(address.wrapping_add(2 * PLANE_OFFSET)),
        };
    }
}

/// 40 column short code: two planes A' and B', decoded left to right.
///
/// A control cell (DEL, B' = `100x xUIC`) sets underline, insert, conceal
/// and, from A', the background colour for every following cell of the row
/// until the next control cell. The control cell itself is blank.
///
/// Otherwise A' bit 7 selects between a graphics cell (A' low bits give its
/// own background, which carries on) and an alphanumeric cell (A' packs
/// negative, width, height, flash and foreground; the background is the
/// carried one). B' is the character code in both cases.
pub fn load_row_40_short(row: &mut RowBuffer, vram: &VideoMemory, memory_row: u8, block: u8) {
    let mut underline = 0;
    let mut insert = 0;
    let mut conceal = 0;
    let mut background = 0;

    for (x, cell) in (0..COLUMNS).zip(row.iter_mut()) {
        let address = triplet_address(x, memory_row, block);
        let a_prime = vram.read(address);
        let b_prime = vram.read(address.wrapping_add(PLANE_OFFSET));

        if b_prime & DEL_MASK == DEL_PATTERN {
            underline = (b_prime & 0b100) << 2;
            insert = (b_prime & 0b010) >> 1;
            conceal = (b_prime & 0b001) << 2;
            background = a_prime & 0b111;
            *cell = Triplet {
                a: a_prime,
                b: B_DEL | underline | conceal | insert,
                c: 0,
            };
            continue;
        }

        let in_ram = b_prime & B_IN_RAM;
        *cell = if a_prime & 0x80 != 0 {
            let a = a_prime & 0x7F;
            background = a & 0b111;
            Triplet {
                a,
                b: in_ram | B_DEL | conceal | insert,
                c: b_prime,
            }
        } else {
            let color = (a_prime & 0b0000_0111) << 4;
            let flash = a_prime & 0b0000_1000;
            let height = (a_prime & 0b0001_0000) >> 3;
            let width = (a_prime & 0b0010_0000) >> 2;
            let negative = (a_prime & 0b0100_0000) << 1;
            Triplet {
                a: negative | color | flash | background,
                b: in_ram | underline | width | conceal | height | insert,
                c: b_prime,
            }
        };
    }
}
