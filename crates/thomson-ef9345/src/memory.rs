//! VRAM and charset ROM stores.
//!
//! Both are 8 KiB. The VRAM decodes the low 13 address lines only, so the
//! 14-bit addresses produced by the transcoder (and the plane offsets added
//! to them) alias into the store instead of falling off its end.

use crate::error::Ef9345Error;

/// Size of the video RAM in bytes.
pub const VRAM_SIZE: usize = 0x2000;
/// Size of the charset ROM image in bytes.
pub const CHARSET_SIZE: usize = 0x2000;

const VRAM_MASK: u16 = (VRAM_SIZE - 1) as u16;
const CHARSET_MASK: u16 = (CHARSET_SIZE - 1) as u16;

/// Video RAM.
#[derive(Clone)]
pub struct VideoMemory {
    ram: Box<[u8; VRAM_SIZE]>,
}

impl VideoMemory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; VRAM_SIZE]),
        }
    }

    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        self.ram[usize::from(address & VRAM_MASK)]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.ram[usize::from(address & VRAM_MASK)] = value;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.ram[..]
    }
}

impl Default for VideoMemory {
    fn default() -> Self {
        Self::new()
    }
}

/// Character generator ROM.
///
/// Without an image every read returns 0: the chip still runs, glyphs just
/// render as background.
#[derive(Clone)]
pub struct CharsetMemory {
    rom: Option<Box<[u8; CHARSET_SIZE]>>,
}

impl CharsetMemory {
    #[must_use]
    pub fn empty() -> Self {
        Self { rom: None }
    }

    /// Copy a charset image into private storage.
    ///
    /// # Errors
    ///
    /// Returns [`Ef9345Error::CharsetSize`] if the image is not exactly
    /// 8 KiB.
    pub fn from_image(image: &[u8]) -> Result<Self, Ef9345Error> {
        let rom: Box<[u8; CHARSET_SIZE]> = image
            .to_vec()
            .into_boxed_slice()
            .try_into()
            .map_err(|_| Ef9345Error::CharsetSize {
                expected: CHARSET_SIZE,
                actual: image.len(),
            })?;
        Ok(Self { rom: Some(rom) })
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.rom.is_some()
    }

    #[must_use]
    pub fn read(&self, address: u16) -> u8 {
        self.rom
            .as_ref()
            .map_or(0, |rom| rom[usize::from(address & CHARSET_MASK)])
    }
}
