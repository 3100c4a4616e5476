//! The EF9345 chip: state, tick entry point and inspection.

use emu_core::{parse_address, Observable, PinTickable, Ticks, Value};
use log::debug;

use crate::beam::{BeamState, BeamTiming};
use crate::bus::BusLatch;
use crate::command::CommandOutcome;
use crate::config::Ef9345Config;
use crate::error::Ef9345Error;
use crate::memory::{CharsetMemory, VideoMemory};
use crate::palette::PALETTE;
use crate::quadrant::{QuadrantBuffer, NORMAL};
use crate::registers::{DisplayConfig, Registers, DOR, MAT, PAT, ROM, ROR, TGS};
use crate::row::{RowBuffer, Triplet};
use crate::transcode::COLUMNS;
use crate::{FB_HEIGHT, FB_WIDTH};

/// Thomson EF9345 semigraphic display processor.
pub struct Ef9345 {
    pub(crate) regs: Registers,
    pub(crate) display: DisplayConfig,
    /// Pins as returned by the previous tick; edges are detected against
    /// them.
    pub(crate) pins: u64,
    pub(crate) latch: BusLatch,
    pub(crate) vram: VideoMemory,
    pub(crate) charset: CharsetMemory,
    pub(crate) timing: BeamTiming,
    pub(crate) beam: BeamState,
    pub(crate) row_buffer: RowBuffer,
    pub(crate) quadrants: QuadrantBuffer,
    /// Palette indices, `FB_WIDTH` x `FB_HEIGHT`.
    pub(crate) framebuffer: Vec<u8>,
    pub(crate) last_outcome: Option<CommandOutcome>,
    ticks: Ticks,
}

impl Ef9345 {
    /// Build a chip in its reset state.
    ///
    /// # Errors
    ///
    /// Fails if the charset image is not exactly 8 KiB or the clock cannot
    /// drive the 40 column timing.
    pub fn new(config: &Ef9345Config) -> Result<Self, Ef9345Error> {
        let timing = BeamTiming::new(config.clock)?;
        let charset = match &config.charset {
            Some(image) => CharsetMemory::from_image(image)?,
            None => CharsetMemory::empty(),
        };
        debug!(
            "EF9345: {} Hz, {} ticks per line, charset {}",
            config.clock.frequency_hz,
            timing.ticks_per_line,
            if charset.is_loaded() { "loaded" } else { "absent" }
        );
        Ok(Self::from_parts(timing, charset))
    }

    fn from_parts(timing: BeamTiming, charset: CharsetMemory) -> Self {
        let regs = Registers::default();
        Self {
            display: DisplayConfig::from_registers(&regs),
            regs,
            pins: 0,
            latch: BusLatch::default(),
            vram: VideoMemory::new(),
            charset,
            timing,
            beam: BeamState::default(),
            row_buffer: [Triplet::default(); COLUMNS as usize],
            quadrants: [NORMAL; COLUMNS as usize],
            framebuffer: vec![0; FB_WIDTH as usize * FB_HEIGHT as usize],
            last_outcome: None,
            ticks: Ticks::ZERO,
        }
    }

    /// Return to the power-on state. The charset and clock are kept.
    pub fn reset(&mut self) {
        let charset = std::mem::replace(&mut self.charset, CharsetMemory::empty());
        *self = Self::from_parts(self.timing, charset);
        debug!("EF9345: reset");
    }

    /// Ticks in one full frame.
    #[must_use]
    pub fn frame_ticks(&self) -> u64 {
        u64::from(self.timing.ticks_per_line) * u64::from(self.display.lines_per_frame)
    }

    /// Run one frame with the pins held, returning the final pins.
    pub fn run_frame(&mut self, pins: u64) -> u64 {
        let count = Ticks::new(self.frame_ticks());
        self.tick_n(pins, count)
    }

    #[must_use]
    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    #[must_use]
    pub fn display_config(&self) -> &DisplayConfig {
        &self.display
    }

    #[must_use]
    pub fn timing(&self) -> &BeamTiming {
        &self.timing
    }

    #[must_use]
    pub fn current_line(&self) -> u16 {
        self.beam.current_line
    }

    #[must_use]
    pub fn line_tick(&self) -> u16 {
        self.beam.line_tick
    }

    /// Screen row last fetched into the row buffer.
    #[must_use]
    pub fn loaded_row(&self) -> Option<u8> {
        self.beam.latest_loaded_row
    }

    /// Read VRAM without side effects.
    #[must_use]
    pub fn peek_vram(&self, address: u16) -> u8 {
        self.vram.read(address)
    }

    #[must_use]
    pub fn vram(&self) -> &[u8] {
        self.vram.as_slice()
    }

    #[must_use]
    pub fn row_buffer(&self) -> &RowBuffer {
        &self.row_buffer
    }

    #[must_use]
    pub fn quadrant_buffer(&self) -> &QuadrantBuffer {
        &self.quadrants
    }

    /// Palette indices, row-major.
    #[must_use]
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    #[must_use]
    pub fn framebuffer_width(&self) -> u32 {
        FB_WIDTH
    }

    #[must_use]
    pub fn framebuffer_height(&self) -> u32 {
        FB_HEIGHT
    }

    /// ARGB32 colours for the framebuffer indices.
    #[must_use]
    pub fn palette(&self) -> &'static [u32; 8] {
        &PALETTE
    }

    /// Result of the most recent command, `None` before the first one.
    #[must_use]
    pub fn last_command_outcome(&self) -> Option<CommandOutcome> {
        self.last_outcome
    }

    /// Pins returned by the last tick.
    #[must_use]
    pub fn pins(&self) -> u64 {
        self.pins
    }

    #[must_use]
    pub fn ticks(&self) -> Ticks {
        self.ticks
    }
}

impl PinTickable for Ef9345 {
    fn tick(&mut self, pins: u64) -> u64 {
        let pins = self.bus_transfer(pins);
        let pins = self.beam_update(pins);
        self.pins = pins;
        self.ticks += 1;
        pins
    }
}

impl Observable for Ef9345 {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("vram.") {
            return parse_address(rest).map(|a| Value::U8(self.vram.read(a)));
        }
        if let Some(index) = path
            .strip_prefix('r')
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|&n| n < 8)
        {
            return Some(self.regs.direct[index].into());
        }
        match path {
            "rom" => Some(self.regs.indirect[ROM].into()),
            "tgs" => Some(self.regs.indirect[TGS].into()),
            "mat" => Some(self.regs.indirect[MAT].into()),
            "pat" => Some(self.regs.indirect[PAT].into()),
            "dor" => Some(self.regs.indirect[DOR].into()),
            "ror" => Some(self.regs.indirect[ROR].into()),
            "line" => Some(self.beam.current_line.into()),
            "line_tick" => Some(self.beam.line_tick.into()),
            "row" => self.beam.latest_loaded_row.map(Value::U8),
            "char_code" => Some(Value::Name(
                self.display.char_code().map_or("undefined", |code| code.name()),
            )),
            "lines_per_frame" => Some(self.display.lines_per_frame.into()),
            "interlaced" => Some(self.display.interlaced.into()),
            "block_origin" => Some(self.display.block_origin.into()),
            "origin_row" => Some(self.display.origin_row.into()),
            "ticks" => Some(self.ticks.get().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "r0",
            "r1",
            "r2",
            "r3",
            "r4",
            "r5",
            "r6",
            "r7",
            "rom",
            "tgs",
            "mat",
            "pat",
            "dor",
            "ror",
            "line",
            "line_tick",
            "row",
            "char_code",
            "lines_per_frame",
            "interlaced",
            "block_origin",
            "origin_row",
            "ticks",
            "vram.<address>",
        ]
    }
}
