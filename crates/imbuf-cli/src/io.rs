//! PNG reading and writing.
//!
//! Everything is loaded as 8-bit RGBA byte storage. Palette and low bit
//! depth images are expanded, 16-bit images are stripped to 8 bits.

use anyhow::{bail, Context, Result};
use imbuf_core::ImageBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// A decoded PNG with its on-disk format.
pub struct LoadedPng {
    pub image: ImageBuffer,
    pub color_type: png::ColorType,
    pub bit_depth: png::BitDepth,
}

/// Reads a PNG into a 4-channel byte buffer.
pub fn read_png(path: &Path) -> Result<LoadedPng> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to decode: {}", path.display()))?;

    let color_type = reader.info().color_type;
    let bit_depth = reader.info().bit_depth;

    let buf_size = reader
        .output_buffer_size()
        .context("Cannot determine PNG output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let pixels = &buf[..info.buffer_size()];

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => pixels.to_vec(),
        png::ColorType::Rgb => pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => pixels
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        other => bail!("Unsupported PNG color type after expansion: {:?}", other),
    };

    debug!(
        width = info.width,
        height = info.height,
        ?color_type,
        ?bit_depth,
        "png loaded"
    );

    let image = ImageBuffer::from_bytes(info.width, info.height, rgba)
        .with_context(|| format!("Invalid image: {}", path.display()))?;
    Ok(LoadedPng {
        image,
        color_type,
        bit_depth,
    })
}

/// Writes an image as 8-bit RGBA.
///
/// Float-only images are converted to bytes first.
pub fn write_png(path: &Path, image: &ImageBuffer) -> Result<()> {
    let converted;
    let image = if image.has_byte() {
        image
    } else {
        let mut copy = image.clone();
        copy.ensure_byte();
        converted = copy;
        &converted
    };
    let data = image
        .byte_data()
        .context("Image has no pixel data to write")?;

    let file =
        File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    writer
        .write_image_data(data)
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("Failed to write: {}", path.display()))?;

    debug!(path = %path.display(), width = image.width(), height = image.height(), "png written");
    Ok(())
}
