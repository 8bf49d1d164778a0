//! Error types for the chart splitter

use thiserror::Error;
use zwds_color::ColorError;
use zwds_io::IoError;
use zwds_region::RegionError;

/// Terminal failure of one split run
///
/// A run reports exactly one of these and produces no partial output.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The source image could not be read or decoded
    #[error("failed to load image: {0}")]
    ImageLoadFailure(#[source] IoError),

    /// The mask has no background region at all
    #[error("no regions detected")]
    NoRegionsDetected,

    /// Filtering left a different number of boxes than expected
    #[error("expected {expected} boxes, found {found}")]
    UnexpectedBoxCount { found: usize, expected: usize },

    /// A crop could not be cut out or encoded
    #[error("rendering failed: {0}")]
    RenderingFailure(String),

    /// The run configuration was rejected before any work
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<RegionError> for SplitError {
    fn from(e: RegionError) -> Self {
        match e {
            RegionError::NoRegionsDetected => SplitError::NoRegionsDetected,
            RegionError::UnexpectedBoxCount { found, expected } => {
                SplitError::UnexpectedBoxCount { found, expected }
            }
            RegionError::InvalidParameters(msg) => SplitError::InvalidConfig(msg),
            RegionError::Core(e) => SplitError::RenderingFailure(e.to_string()),
        }
    }
}

impl From<ColorError> for SplitError {
    fn from(e: ColorError) -> Self {
        match e {
            ColorError::InvalidParameters(msg) => SplitError::InvalidConfig(msg),
            ColorError::Core(e) => SplitError::RenderingFailure(e.to_string()),
        }
    }
}

/// Result type for split operations
pub type SplitResult<T> = Result<T, SplitError>;
