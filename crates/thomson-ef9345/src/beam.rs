//! Raster beam: sync outputs, row loading and column rendering.
//!
//! # Timing (40 columns)
//!
//! - One line lasts 64 µs.
//! - HS is asserted (high) for the first 10 µs of each line.
//! - VS is low during the first 2 lines of the frame, high otherwise.
//! - The last 250 lines of the frame are active; they form 25 character
//!   rows of 10 lines: the service row, then 24 data rows.
//! - Pixels start right after the HS prefix: each of the next 40 µs of an
//!   active line shows one 8-pixel column. Nothing is drawn while HS is
//!   asserted.
//!
//! The chip is ticked several times per host bus cycle, so each character
//! row is loaded once and each column rendered once per line, whatever the
//! number of ticks spent in it.

use emu_core::MasterClock;

use crate::ef9345::Ef9345;
use crate::error::Ef9345Error;
use crate::pins::{MASK_HVS_HS, MASK_PC_VS};
use crate::quadrant::{resolve_quadrants, NORMAL};
use crate::render::{render_alpha_column, CELL_HEIGHT, CELL_WIDTH};
use crate::row::load_row;
use crate::transcode::{screen_row_to_memory_row, COLUMNS, FIRST_BULK_ROW};
use crate::{FB_HEIGHT, FB_WIDTH};

const LINE_MICROS: u64 = 64;
const HBLANK_MICROS: u64 = 10;
/// Lines with VS low at the start of the frame.
const VSYNC_LINES: u16 = 2;
/// Service row plus 24 data rows.
pub const SCREEN_ROWS: u8 = 25;

/// Line timing derived from the chip clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamTiming {
    pub ticks_per_micros: u16,
    pub ticks_per_line: u16,
    pub hblank_ticks: u16,
    /// Ticks of the active part of a line (one µs per column).
    pub active_ticks: u16,
}

impl BeamTiming {
    /// # Errors
    ///
    /// Returns [`Ef9345Error::ClockOutOfRange`] below 1 MHz, where a column
    /// would last less than one tick, or when a line no longer fits the
    /// tick counter.
    pub fn new(clock: MasterClock) -> Result<Self, Ef9345Error> {
        let ticks = |micros: u64| u16::try_from(clock.ticks_for_micros(micros).get()).ok();
        match (
            ticks(1),
            ticks(LINE_MICROS),
            ticks(HBLANK_MICROS),
            ticks(u64::from(COLUMNS)),
        ) {
            (Some(ticks_per_micros), Some(ticks_per_line), Some(hblank_ticks), Some(active_ticks))
                if ticks_per_micros > 0 =>
            {
                Ok(Self {
                    ticks_per_micros,
                    ticks_per_line,
                    hblank_ticks,
                    active_ticks,
                })
            }
            _ => Err(Ef9345Error::ClockOutOfRange {
                frequency_hz: clock.frequency_hz,
            }),
        }
    }

    /// Line tick of the first pixel.
    #[must_use]
    pub const fn active_start(&self) -> u16 {
        self.hblank_ticks
    }

    /// Line tick just past the last pixel.
    #[must_use]
    pub const fn active_end(&self) -> u16 {
        self.hblank_ticks + self.active_ticks
    }
}

/// Beam position and the guards against repeated work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeamState {
    /// Ticks elapsed in the current line.
    pub line_tick: u16,
    pub current_line: u16,
    /// Screen row last loaded into the row buffer.
    pub latest_loaded_row: Option<u8>,
    /// Column last rendered on the current line.
    pub latest_rendered_column: Option<u8>,
}

/// Screen row of a display line; negative above the active area. Division
/// truncates toward zero, so the service row is fetched during the nine
/// lines before the first active line.
#[must_use]
pub fn screen_row(current_line: u16, first_active_line: u16) -> i32 {
    (i32::from(current_line) - i32::from(first_active_line)) / i32::from(CELL_HEIGHT)
}

impl Ef9345 {
    /// Advance the beam by one tick and update the sync outputs.
    pub(crate) fn beam_update(&mut self, mut pins: u64) -> u64 {
        let lines_per_frame = self.display.lines_per_frame;

        self.beam.line_tick = (self.beam.line_tick + 1) % self.timing.ticks_per_line;
        if self.beam.line_tick == 0 {
            self.beam.current_line = (self.beam.current_line + 1) % lines_per_frame;
        }
        let line = self.beam.current_line;

        if line < VSYNC_LINES {
            pins &= !MASK_PC_VS;
        } else {
            pins |= MASK_PC_VS;
        }

        if self.beam.line_tick < self.timing.hblank_ticks {
            pins |= MASK_HVS_HS;
        } else {
            pins &= !MASK_HVS_HS;
        }

        let first_active_line = self.display.first_active_line();
        let row = screen_row(line, first_active_line);

        if let Ok(row) = u8::try_from(row) {
            if self.beam.latest_loaded_row != Some(row) {
                self.beam.latest_loaded_row = Some(row);
                if row == 0 {
                    self.quadrants = [NORMAL; COLUMNS as usize];
                }
                if row < SCREEN_ROWS {
                    load_row(&mut self.row_buffer, &self.vram, &self.display, row);
                    resolve_quadrants(&mut self.quadrants, &self.row_buffer);
                }
            }
        }

        let line_tick = self.beam.line_tick;
        if line >= first_active_line
            && line < lines_per_frame
            && (self.timing.active_start()..self.timing.active_end()).contains(&line_tick)
        {
            let x = ((line_tick - self.timing.active_start()) / self.timing.ticks_per_micros) as u8;
            if self.beam.latest_rendered_column != Some(x) {
                self.beam.latest_rendered_column = Some(x);
                let row = row.clamp(0, i32::from(SCREEN_ROWS) - 1) as u8;
                self.render_column(x, row, line - first_active_line);
            }
        }

        pins
    }

    fn render_column(&mut self, x: u8, screen_row: u8, active_line: u16) {
        let cursor = self.cursor_at(x, screen_row);
        let start = usize::from(active_line) * FB_WIDTH as usize + usize::from(x) * CELL_WIDTH;
        debug_assert!(usize::from(active_line) < FB_HEIGHT as usize);
        let column = usize::from(x);
        render_alpha_column(
            &mut self.framebuffer[start..start + CELL_WIDTH],
            self.row_buffer[column],
            self.quadrants[column],
            active_line % CELL_HEIGHT,
            &self.charset,
            cursor,
        );
    }

    /// Whether the main pointer cursor sits on column `x` of a screen row.
    ///
    /// The service row matches memory row 0. Data rows match only when the
    /// pointer is inside the bulk area and on the row's memory row.
    fn cursor_at(&self, x: u8, screen_row: u8) -> bool {
        if !self.regs.cursor_enabled() || self.regs.mp_x() != x {
            return false;
        }
        let cursor_y = self.regs.mp_y();
        if screen_row == 0 {
            cursor_y == 0
        } else {
            cursor_y >= FIRST_BULK_ROW
                && cursor_y == screen_row_to_memory_row(screen_row, self.display.origin_row)
        }
    }
}
