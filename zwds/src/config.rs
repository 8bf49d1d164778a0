//! Run configuration

use crate::error::{SplitError, SplitResult};
use zwds_color::{DEFAULT_COLOR_THRESHOLD, DEFAULT_LINE_COLOR, LineColorOptions};
use zwds_core::Rgb;
use zwds_io::DEFAULT_JPEG_QUALITY;
use zwds_region::{BoxFilterOptions, DEFAULT_EXPECTED_COUNT, DEFAULT_MIN_SIZE_RATIO};

/// Settings for one split run
///
/// # Examples
///
/// ```
/// use zwds::{Rgb, SplitConfig};
///
/// let config = SplitConfig::default()
///     .with_reference_color(Rgb::new(200, 30, 30))
///     .with_color_threshold(25.0);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.expected_box_count, 13);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    /// Color of the chart rulings
    pub reference_color: Rgb,
    /// Maximum RGB distance to the ruling color still counted as a line
    pub color_threshold: f64,
    /// Minimum box width and height as a fraction of the image dimensions
    pub min_box_size_ratio: f64,
    /// Number of boxes a chart must yield
    pub expected_box_count: usize,
    /// JPEG quality of the encoded crops, 1..=100
    pub jpeg_quality: u8,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            reference_color: DEFAULT_LINE_COLOR,
            color_threshold: DEFAULT_COLOR_THRESHOLD,
            min_box_size_ratio: DEFAULT_MIN_SIZE_RATIO,
            expected_box_count: DEFAULT_EXPECTED_COUNT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl SplitConfig {
    pub fn with_reference_color(mut self, color: Rgb) -> Self {
        self.reference_color = color;
        self
    }

    pub fn with_color_threshold(mut self, threshold: f64) -> Self {
        self.color_threshold = threshold;
        self
    }

    pub fn with_min_box_size_ratio(mut self, ratio: f64) -> Self {
        self.min_box_size_ratio = ratio;
        self
    }

    pub fn with_expected_box_count(mut self, count: usize) -> Self {
        self.expected_box_count = count;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Reject settings no run could succeed with.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfig`] for a negative or non-finite
    /// threshold, a size ratio outside `[0, 1]`, an expected count of zero
    /// or a JPEG quality outside `1..=100`.
    pub fn validate(&self) -> SplitResult<()> {
        self.line_color_options().validate()?;
        self.box_filter_options().validate()?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SplitError::InvalidConfig(format!(
                "JPEG quality must be 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Classifier settings
    pub fn line_color_options(&self) -> LineColorOptions {
        LineColorOptions::new(self.reference_color, self.color_threshold)
    }

    /// Filter settings
    pub fn box_filter_options(&self) -> BoxFilterOptions {
        BoxFilterOptions::default()
            .with_min_size_ratio(self.min_box_size_ratio)
            .with_expected_count(self.expected_box_count)
    }
}
