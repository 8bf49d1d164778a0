//! Chart box selection
//!
//! Reduces the raw components of a chart mask to the boxes of the chart:
//! the region with the largest bounding-box area is taken to be the
//! background around the chart and dropped, then regions too small to be a
//! box are discarded, and finally the survivor count must match exactly.
//!
//! Dropping the largest region is a heuristic. A chart that fills the whole
//! image with no margin loses one real box to it and fails the count check.

use crate::conncomp::ConnectedComponent;
use crate::error::{RegionError, RegionResult};

/// Default minimum box size, as a fraction of the image dimensions.
pub const DEFAULT_MIN_SIZE_RATIO: f64 = 0.01;

/// Boxes in a ZWDS chart: one central box and twelve palaces.
pub const DEFAULT_EXPECTED_COUNT: usize = 13;

/// Options for chart box selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxFilterOptions {
    /// Minimum box width and height, as a fraction of image width and height
    pub min_size_ratio: f64,
    /// Number of boxes that must survive filtering
    pub expected_count: usize,
}

impl Default for BoxFilterOptions {
    fn default() -> Self {
        Self {
            min_size_ratio: DEFAULT_MIN_SIZE_RATIO,
            expected_count: DEFAULT_EXPECTED_COUNT,
        }
    }
}

impl BoxFilterOptions {
    pub fn with_min_size_ratio(mut self, ratio: f64) -> Self {
        self.min_size_ratio = ratio;
        self
    }

    pub fn with_expected_count(mut self, count: usize) -> Self {
        self.expected_count = count;
        self
    }

    /// Check that the ratio lies in `[0, 1]` and the count is positive.
    pub fn validate(&self) -> RegionResult<()> {
        if !(0.0..=1.0).contains(&self.min_size_ratio) {
            return Err(RegionError::InvalidParameters(format!(
                "min size ratio must be in [0, 1], got {}",
                self.min_size_ratio
            )));
        }
        if self.expected_count == 0 {
            return Err(RegionError::InvalidParameters(
                "expected box count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Minimum `(width, height)` a box must have in a `width` x `height`
    /// image.
    ///
    /// The products are floored, so a box exactly `floor(W * ratio)` wide
    /// is kept.
    pub fn min_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        // Products within 1e-9 below an integer round up to it: `100 * 0.29`
        // evaluates to 28.999999999999996 and yields 29, not 28. Products
        // further below, like `100 * 0.2899`, are floored as usual.
        let floor = |dim: u32| (dim as f64 * self.min_size_ratio + 1e-9).floor() as u32;
        (floor(width), floor(height))
    }
}

/// Remove the component with the largest bounding-box area.
///
/// Among equal areas the earliest discovered component is removed. The
/// remaining components keep their relative order. Returns the removed
/// component, or `None` for empty input.
pub fn drop_largest(components: &mut Vec<ConnectedComponent>) -> Option<ConnectedComponent> {
    let (index, _) = components
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, c)| c.bounds.area())?;
    Some(components.remove(index))
}

/// Keep components at least `min_width` wide and `min_height` tall.
pub fn filter_by_min_size(
    components: Vec<ConnectedComponent>,
    min_width: u32,
    min_height: u32,
) -> Vec<ConnectedComponent> {
    components
        .into_iter()
        .filter(|c| c.bounds.width() >= min_width && c.bounds.height() >= min_height)
        .collect()
}

/// Select the chart boxes from all components of a `width` x `height` mask.
///
/// Survivors are returned in discovery order.
///
/// # Errors
///
/// - [`RegionError::NoRegionsDetected`] if `components` is empty
/// - [`RegionError::UnexpectedBoxCount`] if the number of survivors differs
///   from `options.expected_count`
/// - [`RegionError::InvalidParameters`] for invalid options
pub fn select_chart_boxes(
    mut components: Vec<ConnectedComponent>,
    width: u32,
    height: u32,
    options: &BoxFilterOptions,
) -> RegionResult<Vec<ConnectedComponent>> {
    options.validate()?;

    let Some(largest) = drop_largest(&mut components) else {
        log::warn!("no background regions in {}x{} mask", width, height);
        return Err(RegionError::NoRegionsDetected);
    };
    log::debug!(
        "dropped largest region {:?} (area {})",
        largest.bounds,
        largest.bounds.area()
    );

    let (min_width, min_height) = options.min_dimensions(width, height);
    let before = components.len();
    let boxes = filter_by_min_size(components, min_width, min_height);
    log::debug!(
        "size filter {}x{}: {} of {} regions kept",
        min_width,
        min_height,
        boxes.len(),
        before
    );

    if boxes.len() != options.expected_count {
        log::warn!(
            "expected {} boxes, found {}",
            options.expected_count,
            boxes.len()
        );
        return Err(RegionError::UnexpectedBoxCount {
            found: boxes.len(),
            expected: options.expected_count,
        });
    }

    Ok(boxes)
}
