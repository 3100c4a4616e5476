//! Trait for chips advanced through a pin vector.

use crate::Ticks;

/// A chip driven by its pins, one master clock tick at a time.
///
/// The caller owns the pin vector. It sets the input lines, calls `tick()`,
/// and reads back the output lines from the returned vector. Chips remember
/// the previous vector themselves so they can react to edges rather than
/// levels: a host that ticks the chip several times per bus cycle must not
/// see a strobe processed more than once.
pub trait PinTickable {
    /// Advance by one master clock tick with the given input pins.
    fn tick(&mut self, pins: u64) -> u64;

    /// Advance by `count` ticks with the input pins held constant.
    ///
    /// Output lines driven by the chip are carried from one tick into the
    /// next, exactly as repeated `tick()` calls would.
    fn tick_n(&mut self, pins: u64, count: Ticks) -> u64 {
        let mut pins = pins;
        for _ in 0..count.get() {
            pins = self.tick(pins);
        }
        pins
    }
}
