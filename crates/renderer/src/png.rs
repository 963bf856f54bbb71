//! PNG encoding for RGB image data.
//!
//! Writes 8-bit truecolor PNGs (color type 2) with a single IDAT chunk and
//! no scanline filtering. Output depends only on the input bytes, so the
//! same grid and ramp always produce the same file.

use std::fs;
use std::io::Write;
use std::path::Path;

use route_common::DensityGrid;
use tracing::info;

use crate::colormap::ColorRamp;
use crate::equalize::render_equalized;
use crate::{RenderError, Result};

/// PNG file signature
const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Create an RGB PNG image.
///
/// # Arguments
/// - `pixels`: RGB pixel data (3 bytes per pixel, row-major)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png_rgb(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(RenderError::Dimensions { width, height }),
    };
    let expected = width * height * 3;
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&w.to_be_bytes());
    ihdr_data.extend_from_slice(&h.to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(2); // color type (RGB)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat_rgb(pixels, width, height).map_err(RenderError::Compression)?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Equalize, color and encode a density grid.
pub fn render_png(grid: &DensityGrid, ramp: ColorRamp) -> Result<Vec<u8>> {
    let rgb = render_equalized(grid, ramp);
    create_png_rgb(&rgb, grid.width(), grid.height())
}

/// Render a density grid and write the PNG to `path`.
pub fn write_png(path: impl AsRef<Path>, grid: &DensityGrid, ramp: ColorRamp) -> Result<()> {
    let path = path.as_ref();
    let png = render_png(grid, ramp)?;
    fs::write(path, &png).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        ramp = %ramp,
        bytes = png.len(),
        "Wrote density PNG"
    );
    Ok(())
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    // Write length
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());

    // Write chunk type
    png.extend_from_slice(chunk_type);

    // Write data
    png.extend_from_slice(data);

    // CRC covers type and data
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate RGB image data for the IDAT chunk.
fn deflate_idat_rgb(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * 3;

    // Add filter byte (0 = no filter) to each scanline
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in pixels.chunks_exact(stride) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}
