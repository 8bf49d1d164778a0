//! Conversion to and from interleaved 8-bit sample buffers
//!
//! Decoders hand back interleaved bytes (gray, gray+alpha, RGB or RGBA);
//! encoders want RGB or RGBA. These helpers convert between those layouts
//! and the packed `0xRRGGBBAA` words.

use super::{GridData, ImageFormat, PixelGrid};
use crate::color;
use crate::error::{Error, Result};
use std::sync::Arc;

impl PixelGrid {
    /// Build a grid from interleaved samples with `channels` bytes per pixel.
    ///
    /// Supported channel counts:
    ///
    /// | channels | layout |
    /// |----------|--------|
    /// | 1 | gray |
    /// | 2 | gray + alpha |
    /// | 3 | RGB |
    /// | 4 | RGBA |
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, an unsupported channel count,
    /// or a buffer whose length is not `width * height * channels`.
    pub fn from_interleaved(
        width: u32,
        height: u32,
        channels: u32,
        bytes: &[u8],
        informat: ImageFormat,
    ) -> Result<PixelGrid> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if !(1..=4).contains(&channels) {
            return Err(Error::UnsupportedSpp(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if bytes.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let data: Vec<u32> = bytes
            .chunks_exact(channels as usize)
            .map(|px| match px {
                [g] => color::compose_rgb(*g, *g, *g),
                [g, a] => color::compose_rgba(*g, *g, *g, *a),
                [r, g, b] => color::compose_rgb(*r, *g, *b),
                [r, g, b, a] => color::compose_rgba(*r, *g, *b, *a),
                _ => unreachable!("chunks_exact yields 1..=4 samples"),
            })
            .collect();

        let spp = if channels == 2 || channels == 4 { 4 } else { 3 };

        Ok(PixelGrid {
            inner: Arc::new(GridData {
                width,
                height,
                spp,
                informat,
                data,
            }),
        })
    }

    /// Build a grid from tightly packed RGBA bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<PixelGrid> {
        Self::from_interleaved(width, height, 4, bytes, ImageFormat::Unknown)
    }

    /// Build a grid from tightly packed RGB bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<PixelGrid> {
        Self::from_interleaved(width, height, 3, bytes, ImageFormat::Unknown)
    }

    /// Interleaved RGBA bytes, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data().len() * 4);
        for &pixel in self.data() {
            out.extend_from_slice(&pixel.to_be_bytes());
        }
        out
    }

    /// Interleaved RGB bytes, row-major. Alpha is dropped.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data().len() * 3);
        for &pixel in self.data() {
            let (r, g, b) = color::extract_rgb(pixel);
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}
