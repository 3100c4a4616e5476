//! Construction errors.
//!
//! Only building a chip can fail. Once running, bad register contents are
//! contract violations of the host and panic instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Ef9345Error {
    #[error("charset image must be {expected} bytes, got {actual}")]
    CharsetSize { expected: usize, actual: usize },
    #[error("clock of {frequency_hz} Hz is outside the 1 MHz - 1 GHz range")]
    ClockOutOfRange { frequency_hz: u64 },
}
