//! WebP image format support
//!
//! Reads still WebP images (lossy or lossless). Animated WebP images are
//! rejected; a chart is always a single frame.

use crate::{IoError, IoResult};
use image_webp::WebPDecoder;
use std::io::{BufRead, Seek};
use zwds_core::{ImageFormat, PixelGrid};

/// Read a WebP image
///
/// The resulting grid has spp=4 if the image has an alpha channel and
/// spp=3 otherwise.
pub fn read_webp<R: BufRead + Seek>(reader: R) -> IoResult<PixelGrid> {
    let mut decoder = WebPDecoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("WebP decode error: {}", e)))?;

    if decoder.is_animated() {
        return Err(IoError::UnsupportedFormat(
            "animated WebP not supported".to_string(),
        ));
    }

    let (width, height) = decoder.dimensions();
    let channels = if decoder.has_alpha() { 4 } else { 3 };

    let buffer_size = decoder.output_buffer_size().ok_or_else(|| {
        IoError::DecodeError("failed to determine output buffer size".to_string())
    })?;
    let mut buffer = vec![0u8; buffer_size];
    decoder
        .read_image(&mut buffer)
        .map_err(|e| IoError::DecodeError(format!("WebP read error: {}", e)))?;

    Ok(PixelGrid::from_interleaved(
        width,
        height,
        channels,
        &buffer,
        ImageFormat::WebP,
    )?)
}
