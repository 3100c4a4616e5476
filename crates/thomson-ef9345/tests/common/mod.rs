//! VG5000-style host driving the EF9345 through its pins only.
//!
//! The VG5000 Z80 runs at 4 MHz and the EF9345 at 12 MHz, so every bus
//! phase is held for three chip ticks.

#![allow(dead_code)]

use thomson_ef9345::pins::{mux_data, set_mux_data, MASK_AS, MASK_DS, MASK_RW};
use thomson_ef9345::{Ef9345, Ef9345Config, PinTickable, Ticks};

/// DS and R/W high, AS low.
pub const IDLE: u64 = MASK_DS | MASK_RW;
/// Chip ticks per host T-state.
pub const HOLD: u64 = 3;

pub const DIRECT: u8 = 0x20;
pub const EXECUTE: u8 = 0x08;

pub struct Host {
    pub chip: Ef9345,
    pub hold: u64,
}

impl Host {
    pub fn new() -> Self {
        Self::with_config(&Ef9345Config::default())
    }

    pub fn with_config(config: &Ef9345Config) -> Self {
        let mut chip = Ef9345::new(config).unwrap();
        chip.tick(IDLE);
        Self { chip, hold: HOLD }
    }

    fn phase(&mut self, pins: u64) -> u64 {
        self.chip.tick_n(pins, Ticks::new(self.hold))
    }

    fn address(&mut self, address: u8) {
        self.phase(set_mux_data(IDLE | MASK_AS, address));
        self.phase(set_mux_data(IDLE, address));
    }

    pub fn write_reg(&mut self, reg: u8, value: u8) {
        self.address(DIRECT | reg);
        self.phase(set_mux_data(MASK_DS, value));
        self.phase(set_mux_data(IDLE, value));
    }

    pub fn read_reg(&mut self, reg: u8) -> u8 {
        self.address(DIRECT | reg);
        let value = mux_data(self.phase(set_mux_data(MASK_RW, DIRECT | reg)));
        self.phase(IDLE);
        value
    }

    /// Write R0 and start the command.
    pub fn command(&mut self, r0: u8) {
        self.address(DIRECT | EXECUTE);
        self.phase(set_mux_data(MASK_DS, r0));
        self.phase(set_mux_data(IDLE, r0));
    }

    /// Point the main pointer at (x, y); `r7_bits`/`r6_bits` carry the
    /// block bits.
    pub fn set_main_pointer(&mut self, x: u8, y: u8, r7_bits: u8, r6_bits: u8) {
        self.write_reg(6, r6_bits | y);
        self.write_reg(7, r7_bits | x);
    }

    /// OCT write through the main pointer.
    pub fn poke(&mut self, x: u8, y: u8, r7_bits: u8, value: u8) {
        self.set_main_pointer(x, y, r7_bits, 0);
        self.write_reg(1, value);
        self.command(0x30);
    }

    /// IND write of an indirect register.
    pub fn write_indirect(&mut self, reg: u8, value: u8) {
        self.write_reg(1, value);
        self.command(0x80 | reg);
    }

    pub fn idle(&mut self, ticks: u64) {
        self.chip.tick_n(IDLE, Ticks::new(ticks));
    }

    pub fn run_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            self.chip.run_frame(IDLE);
        }
    }

    /// Run until the chip next loads screen row `row`.
    pub fn run_until_row(&mut self, row: u8) {
        let limit = self.chip.frame_ticks() * 2;
        let mut left = self.chip.loaded_row() != Some(row);
        for _ in 0..limit {
            self.chip.tick(IDLE);
            let loaded = self.chip.loaded_row() == Some(row);
            if left && loaded {
                return;
            }
            left |= !loaded;
        }
        panic!("row {row} never loaded");
    }

    /// One display line of the framebuffer.
    pub fn line(&self, y: usize) -> &[u8] {
        let width = self.chip.framebuffer_width() as usize;
        &self.chip.framebuffer()[y * width..(y + 1) * width]
    }
}
