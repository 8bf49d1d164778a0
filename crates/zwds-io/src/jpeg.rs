//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Grayscale, RGB and CMYK inputs decode to opaque RGB;
//! output is always baseline RGB, since JPEG has no alpha channel.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use std::io::{Read, Write};
use zwds_core::{ImageFormat, PixelGrid};

/// Default encoder quality, on the usual 1..=100 scale.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelGrid> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let grid = match info.pixel_format {
        PixelFormat::L8 => {
            PixelGrid::from_interleaved(width, height, 1, &pixels, ImageFormat::Jpeg)?
        }
        PixelFormat::L16 => {
            // Big-endian 16-bit samples; keep the high byte
            let gray: Vec<u8> = pixels.chunks_exact(2).map(|s| s[0]).collect();
            PixelGrid::from_interleaved(width, height, 1, &gray, ImageFormat::Jpeg)?
        }
        PixelFormat::RGB24 => {
            PixelGrid::from_interleaved(width, height, 3, &pixels, ImageFormat::Jpeg)?
        }
        PixelFormat::CMYK32 => {
            let rgb: Vec<u8> = pixels
                .chunks_exact(4)
                .flat_map(|p| {
                    let k = 255 - p[3] as u32;
                    let conv = |c: u8| ((255 - c as u32) * k / 255) as u8;
                    [conv(p[0]), conv(p[1]), conv(p[2])]
                })
                .collect();
            PixelGrid::from_interleaved(width, height, 3, &rgb, ImageFormat::Jpeg)?
        }
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    Ok(grid)
}

/// Write a grid as a baseline RGB JPEG.
///
/// Alpha is discarded.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if `quality` is outside `1..=100` or
/// either dimension exceeds the format limit of 65535.
pub fn write_jpeg<W: Write>(grid: &PixelGrid, writer: W, quality: u8) -> IoResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(IoError::EncodeError(format!(
            "JPEG quality must be 1..=100, got {}",
            quality
        )));
    }
    let width = u16::try_from(grid.width()).map_err(|_| {
        IoError::EncodeError(format!("width {} exceeds JPEG limit", grid.width()))
    })?;
    let height = u16::try_from(grid.height()).map_err(|_| {
        IoError::EncodeError(format!("height {} exceeds JPEG limit", grid.height()))
    })?;

    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(&grid.to_rgb_bytes(), width, height, ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    Ok(())
}

/// Encode a grid as JPEG into memory.
pub fn encode_jpeg(grid: &PixelGrid, quality: u8) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_jpeg(grid, &mut buffer, quality)?;
    Ok(buffer)
}
