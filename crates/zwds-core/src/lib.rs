//! zwds-core - Basic data structures for chart segmentation
//!
//! This crate provides the fundamental data structures shared by the
//! ZWDS chart splitter crates:
//!
//! - [`PixelGrid`] / [`PixelGridMut`] - Dense RGBA image container (immutable / mutable)
//! - [`BoundingBox`] - Inclusive axis-aligned pixel rectangle
//! - [`Mask`] - Bit-packed binary classification of every pixel
//! - [`color`] - Packing helpers for 32-bit RGBA pixels and the [`Rgb`] type

pub mod bbox;
pub mod error;
pub mod grid;
pub mod mask;

pub use bbox::BoundingBox;
pub use color::Rgb;
pub use error::{Error, Result};
pub use grid::{ImageFormat, PixelGrid, PixelGridMut};
pub use mask::Mask;

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// Pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    use crate::error::{Error, Result};
    use std::fmt;
    use std::str::FromStr;

    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose an opaque 32-bit pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// An opaque RGB color.
    ///
    /// Parses from `#rrggbb` or `rrggbb` and displays as `#rrggbb`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Rgb {
        pub r: u8,
        pub g: u8,
        pub b: u8,
    }

    impl Rgb {
        pub const BLACK: Rgb = Rgb::new(0, 0, 0);
        pub const WHITE: Rgb = Rgb::new(255, 255, 255);

        pub const fn new(r: u8, g: u8, b: u8) -> Self {
            Self { r, g, b }
        }

        /// Take the color channels of a packed pixel, ignoring alpha.
        #[inline]
        pub fn from_pixel(pixel: u32) -> Self {
            let (r, g, b) = extract_rgb(pixel);
            Self { r, g, b }
        }

        /// Pack as an opaque pixel.
        #[inline]
        pub fn to_pixel(self) -> u32 {
            compose_rgb(self.r, self.g, self.b)
        }

        /// Squared Euclidean distance in RGB space.
        #[inline]
        pub fn distance_squared(self, other: Rgb) -> u32 {
            let dr = self.r as i32 - other.r as i32;
            let dg = self.g as i32 - other.g as i32;
            let db = self.b as i32 - other.b as i32;
            (dr * dr + dg * dg + db * db) as u32
        }

        /// Euclidean distance in RGB space.
        #[inline]
        pub fn distance(self, other: Rgb) -> f64 {
            (self.distance_squared(other) as f64).sqrt()
        }
    }

    impl fmt::Display for Rgb {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
    }

    impl FromStr for Rgb {
        type Err = Error;

        fn from_str(s: &str) -> Result<Self> {
            let hex = s.trim().trim_start_matches('#');
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(Error::InvalidParameter(format!(
                    "expected a #rrggbb color, got '{}'",
                    s
                )));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|e| {
                    Error::InvalidParameter(format!("invalid hex color '{}': {}", s, e))
                })
            };
            Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
        }
    }

}
