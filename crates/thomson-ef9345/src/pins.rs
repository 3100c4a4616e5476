//! EF9345 pin vector.
//!
//! All pins live in one `u64`. Input lines are set by the host before each
//! tick; output lines are driven by the chip in the returned vector.
//!
//! | Bits  | Pins        | Direction | Notes                                   |
//! |-------|-------------|-----------|-----------------------------------------|
//! | 0-7   | AD0-AD7     | in/out    | multiplexed address/data bus            |
//! | 8     | AS          | in        | address strobe, latches on falling edge |
//! | 9     | DS          | in        | data strobe, level latched by AS        |
//! | 10    | R/W         | in        | read high, write low                    |
//! | 11    | CS/         | in        | tied low on the VG5000                  |
//! | 12    | OE/         | out       | VRAM output enable                      |
//! | 13    | WE/         | out       | VRAM write enable                       |
//! | 14    | ASM/        | out       | VRAM address strobe                     |
//! | 15    | HVS/HS      | out       | horizontal sync                         |
//! | 16-23 | ADM0-ADM7   | out       | VRAM multiplexed address/data           |
//! | 24-29 | AM8-AM13    | out       | VRAM high address lines                 |
//! | 30    | PC/VS       | out       | vertical sync                           |
//! | 31-33 | B, G, R     | out       | not driven (palette indices instead)    |

pub const PIN_AD0: u32 = 0;
pub const PIN_AS: u32 = 8;
pub const PIN_DS: u32 = 9;
pub const PIN_RW: u32 = 10;
pub const PIN_CS: u32 = 11;
pub const PIN_OE: u32 = 12;
pub const PIN_WE: u32 = 13;
pub const PIN_ASM: u32 = 14;
pub const PIN_HVS_HS: u32 = 15;
pub const PIN_ADM0: u32 = 16;
pub const PIN_AM8: u32 = 24;
pub const PIN_PC_VS: u32 = 30;
pub const PIN_B: u32 = 31;
pub const PIN_G: u32 = 32;
pub const PIN_R: u32 = 33;

pub const MASK_AS: u64 = 1 << PIN_AS;
pub const MASK_DS: u64 = 1 << PIN_DS;
pub const MASK_RW: u64 = 1 << PIN_RW;
pub const MASK_CS: u64 = 1 << PIN_CS;
pub const MASK_OE: u64 = 1 << PIN_OE;
pub const MASK_WE: u64 = 1 << PIN_WE;
pub const MASK_ASM: u64 = 1 << PIN_ASM;
pub const MASK_HVS_HS: u64 = 1 << PIN_HVS_HS;
pub const MASK_PC_VS: u64 = 1 << PIN_PC_VS;
pub const MASK_B: u64 = 1 << PIN_B;
pub const MASK_G: u64 = 1 << PIN_G;
pub const MASK_R: u64 = 1 << PIN_R;

/// AD0-AD7.
pub const MASK_AD: u64 = 0xFF << PIN_AD0;
/// ADM0-ADM7.
pub const MASK_ADM: u64 = 0xFF << PIN_ADM0;
/// AM8-AM13.
pub const MASK_AM: u64 = 0x3F << PIN_AM8;
/// Full 14-bit VRAM address port (ADM0-ADM7 + AM8-AM13).
pub const MASK_MEM_ADDRESS: u64 = MASK_ADM | MASK_AM;

/// Value on the multiplexed address/data lines AD0-AD7.
#[must_use]
pub const fn mux_data(pins: u64) -> u8 {
    ((pins & MASK_AD) >> PIN_AD0) as u8
}

/// Drive `value` onto AD0-AD7.
#[must_use]
pub const fn set_mux_data(pins: u64, value: u8) -> u64 {
    (pins & !MASK_AD) | ((value as u64) << PIN_AD0)
}

/// Address on the internal VRAM port (ADM0-ADM7, AM8-AM13).
#[must_use]
pub const fn mem_address(pins: u64) -> u16 {
    ((pins & MASK_MEM_ADDRESS) >> PIN_ADM0) as u16
}

/// Drive a 14-bit address onto the internal VRAM port.
#[must_use]
pub const fn set_mem_address(pins: u64, address: u16) -> u64 {
    (pins & !MASK_MEM_ADDRESS) | (((address & 0x3FFF) as u64) << PIN_ADM0)
}

/// Transition of one line between two consecutive ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
    Steady,
}

impl Edge {
    /// Compare the `mask` line of the previous and current vectors.
    #[must_use]
    pub const fn detect(previous: u64, current: u64, mask: u64) -> Self {
        match (previous & mask != 0, current & mask != 0) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::Steady,
        }
    }
}
