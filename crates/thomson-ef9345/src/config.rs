//! EF9345 configuration.

use emu_core::MasterClock;

/// Nominal EF9345 clock (12 MHz).
pub const EF9345_FREQUENCY: u64 = 12_000_000;

/// Everything needed to build an [`Ef9345`](crate::Ef9345).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ef9345Config {
    /// Chip clock. Line timing is derived from it once, at construction.
    pub clock: MasterClock,
    /// Character generator ROM image (8 KiB). Without it the chip runs but
    /// every glyph renders as background.
    pub charset: Option<Vec<u8>>,
}

impl Default for Ef9345Config {
    fn default() -> Self {
        Self {
            clock: MasterClock::new(EF9345_FREQUENCY),
            charset: None,
        }
    }
}
