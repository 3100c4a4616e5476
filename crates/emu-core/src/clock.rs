//! Master clock configuration.

use crate::Ticks;

/// Master clock of a chip.
///
/// Components derive every timing constant from this frequency instead of
/// hard-coding tick counts, so the same chip model can be clocked from a
/// different crystal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MasterClock {
    /// Crystal frequency in Hz (e.g., `12_000_000` for the EF9345).
    pub frequency_hz: u64,
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Ticks in one microsecond (integer division).
    #[must_use]
    pub const fn ticks_per_micros(&self) -> u64 {
        self.frequency_hz / 1_000_000
    }

    /// Ticks in `micros` microseconds.
    #[must_use]
    pub const fn ticks_for_micros(&self, micros: u64) -> Ticks {
        Ticks::new(self.ticks_per_micros() * micros)
    }
}
