//! Thomson EF9345 semigraphic display processor.
//!
//! The display chip of the Philips VG5000µ. It owns 8 KiB of video RAM,
//! reached only through commands written to its registers over a
//! multiplexed host bus, and turns that memory into a 40 column by 25 row
//! character display.
//!
//! # Usage
//!
//! The chip is a [`PinTickable`]: the host sets the bus lines in a `u64`
//! pin vector (see [`pins`]), calls `tick()` at 12 MHz and reads back the
//! data and sync lines. The VG5000 runs three chip ticks per Z80 T-state;
//! only signal edges have an effect, so repeated ticks with unchanged pins
//! are harmless.
//!
//! # Registers
//!
//! | Address | Register | Function                              |
//! |---------|----------|---------------------------------------|
//! | R0      | CMD      | Command and parameter nibbles          |
//! | R1      | DATA     | Data byte for VRAM and indirect access |
//! | R2      | DATA 2   | Second data byte (KRG)                 |
//! | R3      | DATA 3   | Third data byte                        |
//! | R4      | AP Y     | Auxiliary pointer row                  |
//! | R5      | AP X     | Auxiliary pointer column               |
//! | R6      | MP Y     | Main pointer row                       |
//! | R7      | MP X     | Main pointer column                    |
//!
//! Address bit 5 selects direct register access and bit 3 starts the
//! command in R0 once the write completes.
//!
//! # Display
//!
//! 262 lines of 64 µs per frame. The last 250 lines form the visible
//! 320 x 250 framebuffer of palette indices: a service row followed by 24
//! data rows of 10 lines each.

mod beam;
mod bus;
pub mod command;
mod config;
mod ef9345;
mod error;
pub mod memory;
mod palette;
pub mod pins;
pub mod quadrant;
pub mod registers;
pub mod render;
pub mod row;
pub mod transcode;

#[cfg(feature = "capture")]
pub mod capture;

/// Visible width in pixels: 40 columns of 8 pixels.
pub const FB_WIDTH: u32 = 320;
/// Visible height in lines: 25 character rows of 10 lines.
pub const FB_HEIGHT: u32 = 250;

pub use beam::{BeamTiming, SCREEN_ROWS};
pub use bus::BusLatch;
pub use command::{Command, CommandOutcome};
pub use config::{Ef9345Config, EF9345_FREQUENCY};
pub use ef9345::Ef9345;
pub use emu_core::{MasterClock, Observable, PinTickable, Ticks, Value};
pub use error::Ef9345Error;
pub use palette::PALETTE;
pub use registers::{DisplayConfig, Registers};
pub use row::{CharCode, Triplet};
