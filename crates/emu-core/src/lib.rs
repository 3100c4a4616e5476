//! Core traits and types for tick-accurate chip emulation.
//!
//! Everything ticks at the chip's master clock. All derived timing (line
//! periods, blanking windows, character slots) is computed from it once, at
//! construction.

mod clock;
mod observable;
mod pin_tickable;
mod ticks;

pub use clock::MasterClock;
pub use observable::{parse_address, Observable, Value};
pub use pin_tickable::PinTickable;
pub use ticks::Ticks;
