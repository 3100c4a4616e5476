//! EF9345 register file.
//!
//! Eight direct registers are visible on the bus. Eight indirect registers
//! are only reachable through the IND command, via R1.
//!
//! | Direct | Role                                                  |
//! |--------|-------------------------------------------------------|
//! | R0     | command code (high nibble) and parameters (low nibble)|
//! | R1-R3  | data transfer                                         |
//! | R4/R5  | auxiliary pointer: row (d'0 on bit 5) / column (b'0, b'1 on bits 7, 6) |
//! | R6/R7  | main pointer: row (d0, d'1, d1 on bits 5-7) / column (b0, b1 on bits 7, 6) |
//!
//! | Indirect | Name | Role                                            |
//! |----------|------|-------------------------------------------------|
//! | 0        | ROM  | charset selection                               |
//! | 1        | TGS  | timing and character code (bits 7-6)            |
//! | 2        | MAT  | margin, cursor display (bit 6)                  |
//! | 3        | PAT  | pattern, short code select (bit 7)              |
//! | 4        | DOR  | default origin                                  |
//! | 7        | ROR  | block origin (bits 7-5) and row origin (4-0)    |

use crate::row::CharCode;

pub const R0: usize = 0;
pub const R1: usize = 1;
pub const R2: usize = 2;
pub const R3: usize = 3;
pub const R4: usize = 4;
pub const R5: usize = 5;
pub const R6: usize = 6;
pub const R7: usize = 7;

pub const ROM: usize = 0;
pub const TGS: usize = 1;
pub const MAT: usize = 2;
pub const PAT: usize = 3;
pub const DOR: usize = 4;
pub const ROR: usize = 7;

/// MAT bit enabling the cursor display.
pub const MAT_CURSOR: u8 = 0x40;

/// Display lines per frame. The 625-line selection is not wired.
pub const LINES_PER_FRAME: u16 = 262;

/// Direct and indirect register banks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub direct: [u8; 8],
    pub indirect: [u8; 8],
}

impl Registers {
    /// Main pointer column (R7 bits 0-5).
    #[must_use]
    pub const fn mp_x(&self) -> u8 {
        self.direct[R7] & 0x3F
    }

    /// Main pointer row (R6 bits 0-4).
    #[must_use]
    pub const fn mp_y(&self) -> u8 {
        self.direct[R6] & 0x1F
    }

    /// Auxiliary pointer column (R5 bits 0-5).
    #[must_use]
    pub const fn ap_x(&self) -> u8 {
        self.direct[R5] & 0x3F
    }

    /// Auxiliary pointer row (R4 bits 0-4).
    #[must_use]
    pub const fn ap_y(&self) -> u8 {
        self.direct[R4] & 0x1F
    }

    #[must_use]
    pub const fn cursor_enabled(&self) -> bool {
        self.indirect[MAT] & MAT_CURSOR != 0
    }
}

/// Display configuration derived from the indirect registers.
///
/// Recomputed on every IND command; the beam scanner only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// TGS bit 0. Latched but not emulated.
    pub interlaced: bool,
    pub lines_per_frame: u16,
    /// Raw character code selector: TGS bits 7-6, PAT bit 7 as bit 2.
    pub char_code: u8,
    /// ROR bits 7-5 placed on bits 3-1 (blocks are always even).
    pub block_origin: u8,
    /// ROR bits 4-0: memory row shown on the first data row.
    pub origin_row: u8,
}

impl DisplayConfig {
    #[must_use]
    pub fn from_registers(regs: &Registers) -> Self {
        let tgs = regs.indirect[TGS];
        let pat = regs.indirect[PAT];
        let ror = regs.indirect[ROR];
        Self {
            interlaced: tgs & 0x01 != 0,
            lines_per_frame: LINES_PER_FRAME,
            char_code: ((tgs >> 6) & 0x03) | ((pat >> 5) & 0x04),
            block_origin: (ror & 0xE0) >> 4,
            origin_row: ror & 0x1F,
        }
    }

    /// Decoded character code, `None` for selector values with no mode.
    #[must_use]
    pub const fn char_code(&self) -> Option<CharCode> {
        CharCode::from_bits(self.char_code)
    }

    /// First display line carrying pixels (250 active lines end the frame).
    #[must_use]
    pub const fn first_active_line(&self) -> u16 {
        self.lines_per_frame - crate::FB_HEIGHT as u16
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::from_registers(&Registers::default())
    }
}
