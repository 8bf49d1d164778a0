//! zwds-test - Regression test framework for the ZWDS chart splitter
//!
//! This crate provides two things:
//!
//! - [`RegParams`]: a small regression harness that numbers each check,
//!   records failures instead of panicking on the first one, and reports
//!   them all from [`RegParams::cleanup`].
//! - [`SyntheticChart`]: an in-memory drawing of a ZWDS-style chart with
//!   known box geometry, so tests need no binary fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use zwds_test::{RegParams, SyntheticChart};
//!
//! let chart = SyntheticChart::new(200, 200).build().unwrap();
//! let mut rp = RegParams::new("pipeline");
//! rp.compare_values(13.0, boxes.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to write intermediate images to
//!   `tests/regout` for visual inspection

mod chart;
mod error;
mod params;

pub use chart::{BuiltChart, CHART_BOX_COUNT, SyntheticChart};
pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // zwds-test is at crates/zwds-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
