//! PixelGrid - The main image container
//!
//! A `PixelGrid` is a dense `width` x `height` array of 32-bit RGBA pixels
//! stored row-major, one word per pixel, packed as `0xRRGGBBAA`.
//!
//! # Ownership model
//!
//! `PixelGrid` uses `Arc` for cheap cloning (shared ownership), which lets
//! several crop workers read the same source image without copying it.
//! To modify pixel data, convert to `PixelGridMut` via
//! [`PixelGrid::try_into_mut`] or [`PixelGrid::to_mut`], then convert back
//! with `Into<PixelGrid>`.

mod access;
mod clip;
mod raw;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format (e.g. a grid built in memory)
    #[default]
    Unknown,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// WebP format
    WebP,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }
}

/// Internal grid data
#[derive(Debug)]
struct GridData {
    width: u32,
    height: u32,
    /// Samples per pixel: 3 for RGB, 4 when the alpha channel is meaningful
    spp: u32,
    /// Format the pixels were decoded from
    informat: ImageFormat,
    data: Vec<u32>,
}

impl GridData {
    fn blank(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            spp: 3,
            informat: ImageFormat::Unknown,
            data: vec![0u32; width as usize * height as usize],
        })
    }
}

/// Immutable, shareable RGBA image.
///
/// # Examples
///
/// ```
/// use zwds_core::PixelGrid;
///
/// let grid = PixelGrid::new(640, 480).unwrap();
/// assert_eq!(grid.width(), 640);
/// assert_eq!(grid.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct PixelGrid {
    inner: Arc<GridData>,
}

impl PixelGrid {
    /// Create a new grid with every pixel set to 0 (transparent black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixelGrid {
            inner: Arc::new(GridData::blank(width, height)?),
        })
    }

    /// Create a new grid with every pixel set to `pixel`.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        let mut data = GridData::blank(width, height)?;
        data.data.fill(pixel);
        Ok(PixelGrid {
            inner: Arc::new(data),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Samples per pixel (3 or 4).
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.spp == 4
    }

    /// Format the pixels were decoded from.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Raw access to the packed pixels, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get the number of strong references to this grid.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Try to take unique ownership for mutation.
    ///
    /// Fails (returning `self`) if other clones are alive.
    pub fn try_into_mut(self) -> std::result::Result<PixelGridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixelGridMut { inner: data }),
            Err(arc) => Err(PixelGrid { inner: arc }),
        }
    }

    /// Create a mutable copy of this grid.
    pub fn to_mut(&self) -> PixelGridMut {
        PixelGridMut {
            inner: GridData {
                width: self.inner.width,
                height: self.inner.height,
                spp: self.inner.spp,
                informat: self.inner.informat,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Pixel-wise equality: same dimensions and same packed pixels.
impl PartialEq for PixelGrid {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.width == other.inner.width
                && self.inner.height == other.inner.height
                && self.inner.data == other.inner.data)
    }
}

impl Eq for PixelGrid {}

/// Mutable grid, used while building or drawing.
#[derive(Debug)]
pub struct PixelGridMut {
    inner: GridData,
}

impl PixelGridMut {
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Set samples per pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSpp`] for anything other than 3 or 4.
    pub fn set_spp(&mut self, spp: u32) -> Result<()> {
        if spp != 3 && spp != 4 {
            return Err(Error::UnsupportedSpp(spp));
        }
        self.inner.spp = spp;
        Ok(())
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }
}

impl From<PixelGridMut> for PixelGrid {
    fn from(grid: PixelGridMut) -> Self {
        PixelGrid {
            inner: Arc::new(grid.inner),
        }
    }
}
