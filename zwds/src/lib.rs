//! zwds - Split ZWDS chart images into their boxes
//!
//! A ZWDS chart is a grid image with one central information box and
//! twelve palace boxes around it, separated by rulings of one known color.
//! This crate recovers the thirteen boxes as independent crops, in reading
//! order (top to bottom, then left to right).
//!
//! # Overview
//!
//! A run passes through these stages:
//!
//! - Decode the image ([`io`])
//! - Classify every pixel as ruling or background ([`classify`])
//! - Label the background regions and drop the outer one and slivers ([`region`])
//! - Order, crop and encode the surviving boxes ([`crop`])
//!
//! # Example
//!
//! ```no_run
//! use zwds::{SplitConfig, split_chart_file, write_archive};
//!
//! let images = split_chart_file("chart.png", &SplitConfig::default()).unwrap();
//! assert_eq!(images.len(), 13);
//! assert_eq!(images[0].filename, "zwds_box_1.jpg");
//! write_archive(&images, "zwds_chart_boxes.zip").unwrap();
//! ```

pub mod config;
pub mod crop;
pub mod error;
pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use zwds_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use zwds_color as classify;
pub use zwds_io as io;
pub use zwds_region as region;

pub use config::SplitConfig;
pub use crop::{
    ProcessedImage, archive_bytes, box_filename, crop_boxes, order_boxes, write_archive,
    write_images,
};
pub use error::{SplitError, SplitResult};
pub use pipeline::{
    ProcessingStep, cut_out_map, split_chart, split_chart_bytes, split_chart_bytes_with_progress,
    split_chart_file, split_chart_file_with_progress, split_chart_with_progress,
};
