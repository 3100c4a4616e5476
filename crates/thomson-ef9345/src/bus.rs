//! Host bus interface.
//!
//! The EF9345 sits on a multiplexed address/data bus. A transaction is:
//!
//! 1. AS falling edge: AD0-AD7 carry the register address. The chip latches
//!    it along with the level of DS (high selects the Intel-style protocol,
//!    the only one emulated). Address bit 3 (XQR) requests execution of R0;
//!    bit 5 selects direct register access.
//! 2. Read: DS falling edge drives the selected register onto AD0-AD7.
//! 3. Write: R/W falling edge stores AD0-AD7 into the selected register.
//!    R/W rising edge then starts the command if XQR was latched.
//!
//! Only edges act. The host holds its pins for several ticks per bus
//! cycle and nothing may happen twice.

use crate::command::{self, CommandOutcome};
use crate::ef9345::Ef9345;
use crate::pins::{mux_data, set_mem_address, set_mux_data, Edge, MASK_AS, MASK_DS, MASK_RW};

/// Latched address bit requesting command execution (XQR).
pub const ADDRESS_EXECUTE: u8 = 0x08;
/// Latched address bit selecting a direct register.
pub const ADDRESS_DIRECT: u8 = 0x20;
/// Value driven when register 0 is read: the status register is not
/// emulated.
pub const R0_READ_VALUE: u8 = 0x00;

/// State captured on the last AS falling edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusLatch {
    pub address: u8,
    /// DS level at the AS edge.
    pub ds: bool,
    pub execute: bool,
}

impl BusLatch {
    #[must_use]
    pub const fn register(&self) -> usize {
        (self.address & 0x07) as usize
    }
}

impl Ef9345 {
    /// Process the bus edges between the previous and the current pins.
    pub(crate) fn bus_transfer(&mut self, mut pins: u64) -> u64 {
        let previous = self.pins;

        if Edge::detect(previous, pins, MASK_AS) == Edge::Falling {
            let address = mux_data(pins);
            self.latch = BusLatch {
                address,
                ds: pins & MASK_DS != 0,
                execute: address & ADDRESS_EXECUTE != 0,
            };
        }

        if Edge::detect(previous, pins, MASK_DS) == Edge::Falling && self.latch.ds {
            let reg = self.latch.register();
            let value = if reg == 0 {
                R0_READ_VALUE
            } else {
                self.regs.direct[reg]
            };
            pins = set_mux_data(pins, value);
        }

        match Edge::detect(previous, pins, MASK_RW) {
            Edge::Falling => {
                if self.latch.ds && self.latch.address & ADDRESS_DIRECT != 0 {
                    self.regs.direct[self.latch.register()] = mux_data(pins);
                }
            }
            Edge::Rising => {
                if self.latch.execute {
                    let outcome =
                        command::execute(&mut self.regs, &mut self.display, &mut self.vram);
                    if let CommandOutcome::MemoryAccess(address) = outcome {
                        pins = set_mem_address(pins, address);
                    }
                    self.last_outcome = Some(outcome);
                }
            }
            Edge::Steady => {}
        }

        pins
    }
}
