//! Error types for zwds-region

use thiserror::Error;

/// Errors that can occur while labeling and selecting regions
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] zwds_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The mask has no background component at all
    #[error("no regions detected")]
    NoRegionsDetected,

    /// The number of boxes left after filtering is not the expected one
    #[error("expected {expected} boxes, found {found}")]
    UnexpectedBoxCount { found: usize, expected: usize },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
