//! zwds-color - Color classification for chart segmentation
//!
//! This crate turns an RGBA [`PixelGrid`](zwds_core::PixelGrid) into a
//! binary [`Mask`](zwds_core::Mask) by measuring each pixel's Euclidean RGB
//! distance to the chart's ruling color:
//!
//! - **Classification** ([`classify`]): [`line_color_mask`] and its options
//! - **Cut-out map** ([`render_mask`]): the mask drawn back as black/white
//!
//! # Examples
//!
//! ```
//! use zwds_color::{LineColorOptions, line_color_mask};
//! use zwds_core::{PixelGrid, Rgb};
//!
//! let grid = PixelGrid::new_filled(4, 4, Rgb::WHITE.to_pixel()).unwrap();
//! let mask = line_color_mask(&grid, &LineColorOptions::default()).unwrap();
//! assert_eq!(mask.count_true(), 16); // all background
//! ```

pub mod classify;
pub mod error;

// Re-export core types
pub use zwds_core;

pub use classify::{
    DEFAULT_COLOR_THRESHOLD, DEFAULT_LINE_COLOR, LineColorOptions, is_line_pixel,
    line_color_mask, render_mask,
};
pub use error::{ColorError, ColorResult};
