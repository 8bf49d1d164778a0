//! zwds-region - Region labeling and box selection
//!
//! This crate provides the two middle stages of chart splitting:
//!
//! - **Connected component analysis** - labeling the background regions of
//!   a [`Mask`](zwds_core::Mask) and measuring their bounds
//! - **Box selection** - discarding the outer background and slivers, then
//!   checking that exactly the expected number of boxes remain
//!
//! # Examples
//!
//! ```
//! use zwds_core::Mask;
//! use zwds_region::{
//!     BoxFilterOptions, ConnectivityType, find_connected_components, select_chart_boxes,
//! };
//!
//! // Background everywhere except a vertical line splitting two halves
//! let mut mask = Mask::filled(40, 20, true).unwrap();
//! for y in 0..20 {
//!     mask.set(15, y, false).unwrap();
//! }
//!
//! let comps = find_connected_components(&mask, ConnectivityType::FourWay);
//! assert_eq!(comps.len(), 2);
//!
//! // The larger half is treated as the outer background
//! let opts = BoxFilterOptions::default().with_expected_count(1);
//! let boxes = select_chart_boxes(comps, 40, 20, &opts).unwrap();
//! assert_eq!(boxes[0].bounds.max_x, 14);
//! ```

pub mod conncomp;
pub mod error;
pub mod select;

// Re-export core types
pub use zwds_core;

pub use conncomp::{
    ConnectedComponent, ConnectivityType, count_connected_components, find_connected_components,
};
pub use error::{RegionError, RegionResult};
pub use select::{
    BoxFilterOptions, DEFAULT_EXPECTED_COUNT, DEFAULT_MIN_SIZE_RATIO, drop_largest,
    filter_by_min_size, select_chart_boxes,
};
