//! EF9345 colour palette.
//!
//! The chip outputs 3-bit RGB with red on bit 0, green on bit 1 and blue on
//! bit 2. Framebuffer bytes are indices into this table.

/// ARGB32 colour for each 3-bit index.
pub const PALETTE: [u32; 8] = [
    0xFF00_0000, // black
    0xFFFF_0000, // red
    0xFF00_FF00, // green
    0xFFFF_FF00, // yellow
    0xFF00_00FF, // blue
    0xFFFF_00FF, // magenta
    0xFF00_FFFF, // cyan
    0xFFFF_FFFF, // white
];
