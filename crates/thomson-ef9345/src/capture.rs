//! Headless capture: PNG screenshots.

#![allow(clippy::cast_possible_truncation)]

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::Ef9345;

/// Save the current framebuffer as an indexed-colour PNG.
///
/// The framebuffer already holds palette indices, so the image is written
/// as-is with the chip palette in the PLTE chunk.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_screenshot(chip: &Ef9345, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::create(path)?;
    let w = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, chip.framebuffer_width(), chip.framebuffer_height());
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(palette_rgb(chip.palette()));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(chip.framebuffer())?;
    Ok(())
}

/// ARGB32 palette to packed RGB triples.
fn palette_rgb(palette: &[u32]) -> Vec<u8> {
    palette
        .iter()
        .flat_map(|&argb| [(argb >> 16) as u8, (argb >> 8) as u8, argb as u8])
        .collect()
}
