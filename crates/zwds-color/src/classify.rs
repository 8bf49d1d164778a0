//! Line-color classification
//!
//! Chart rulings are drawn in one near-uniform color. Thresholding by
//! color distance rather than exact match tolerates anti-aliasing and
//! compression artifacts along box borders.
//!
//! A pixel is a *line* pixel (mask bit `false`) iff
//! `|rgb - reference| <= threshold`; everything else is *background*
//! (mask bit `true`). Alpha is ignored.

use crate::error::{ColorError, ColorResult};
use zwds_core::{Mask, PixelGrid, Rgb};

/// Default ruling color, `#451b7d`.
pub const DEFAULT_LINE_COLOR: Rgb = Rgb::new(69, 27, 125);

/// Default Euclidean RGB distance cutoff.
pub const DEFAULT_COLOR_THRESHOLD: f64 = 40.0;

/// Options for line-color classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineColorOptions {
    /// Color the chart rulings are drawn in
    pub reference: Rgb,
    /// Maximum RGB distance still counted as line color (inclusive)
    pub threshold: f64,
}

impl Default for LineColorOptions {
    fn default() -> Self {
        Self {
            reference: DEFAULT_LINE_COLOR,
            threshold: DEFAULT_COLOR_THRESHOLD,
        }
    }
}

impl LineColorOptions {
    pub fn new(reference: Rgb, threshold: f64) -> Self {
        Self {
            reference,
            threshold,
        }
    }

    /// Set the ruling color
    pub fn with_reference(mut self, reference: Rgb) -> Self {
        self.reference = reference;
        self
    }

    /// Set the distance cutoff
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check that the threshold is a finite, non-negative number.
    pub fn validate(&self) -> ColorResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ColorError::InvalidParameters(format!(
                "color threshold must be finite and non-negative, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Largest squared distance whose square root is still `<= threshold`.
    ///
    /// Squared RGB distances are integers in `0..=195075`, so comparing
    /// them against this bound gives exactly the same answer as comparing
    /// `sqrt(d2) <= threshold`, without a square root per pixel.
    fn squared_limit(&self) -> u32 {
        const MAX_D2: u32 = 3 * 255 * 255;
        let t = self.threshold;
        if t * t >= MAX_D2 as f64 {
            return MAX_D2;
        }
        let mut limit = (t * t).floor() as u32;
        while limit > 0 && (limit as f64).sqrt() > t {
            limit -= 1;
        }
        while limit < MAX_D2 && ((limit + 1) as f64).sqrt() <= t {
            limit += 1;
        }
        limit
    }
}

/// Classify one packed pixel.
///
/// Returns `true` for a line pixel.
#[inline]
pub fn is_line_pixel(pixel: u32, options: &LineColorOptions) -> bool {
    Rgb::from_pixel(pixel).distance(options.reference) <= options.threshold
}

/// Build the background mask of a grid.
///
/// The mask has the grid's dimensions; bit `(x, y)` is `true` when the
/// pixel is background and `false` when it matches the line color.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for a negative or non-finite
/// threshold.
pub fn line_color_mask(grid: &PixelGrid, options: &LineColorOptions) -> ColorResult<Mask> {
    options.validate()?;

    let limit = options.squared_limit();
    let mut mask = Mask::new(grid.width(), grid.height())?;

    for y in 0..grid.height() {
        for (x, &pixel) in grid.row(y).iter().enumerate() {
            if Rgb::from_pixel(pixel).distance_squared(options.reference) > limit {
                mask.set_unchecked(x as u32, y, true);
            }
        }
    }

    log::debug!(
        "line color {} within {}: {} line pixels, {} background",
        options.reference,
        options.threshold,
        mask.count_false(),
        mask.count_true()
    );

    Ok(mask)
}

/// Draw a mask as an opaque image: line pixels black, background white.
pub fn render_mask(mask: &Mask) -> ColorResult<PixelGrid> {
    let mut grid = PixelGrid::new_filled(mask.width(), mask.height(), Rgb::BLACK.to_pixel())?
        .to_mut();
    let white = Rgb::WHITE.to_pixel();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get_unchecked(x, y) {
                grid.set_pixel_unchecked(x, y, white);
            }
        }
    }
    Ok(grid.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zwds_core::color;

    #[test]
    fn test_defaults() {
        let opts = LineColorOptions::default();
        assert_eq!(opts.reference, Rgb::new(69, 27, 125));
        assert_eq!(opts.threshold, 40.0);
    }

    #[test]
    fn test_boundary_is_line() {
        let opts = LineColorOptions::default();
        // Distance exactly 40
        assert!(is_line_pixel(color::compose_rgb(109, 27, 125), &opts));
        // Distance sqrt(1601) > 40
        assert!(!is_line_pixel(color::compose_rgb(109, 28, 125), &opts));
    }

    #[test]
    fn test_alpha_ignored() {
        let opts = LineColorOptions::default();
        assert!(is_line_pixel(color::compose_rgba(69, 27, 125, 0), &opts));
    }

    #[test]
    fn test_squared_limit_matches_sqrt() {
        for t in [0.0, 0.5, 1.0, 1.4142, 1.4143, 39.99, 40.0, 40.01, 441.7, 1000.0] {
            let opts = LineColorOptions::default().with_threshold(t);
            let limit = opts.squared_limit();
            assert!((limit as f64).sqrt() <= t || limit == 0, "t={} limit={}", t, limit);
            if limit < 3 * 255 * 255 {
                assert!(((limit + 1) as f64).sqrt() > t, "t={} limit={}", t, limit);
            }
        }
        assert_eq!(LineColorOptions::default().squared_limit(), 1600);
    }

    #[test]
    fn test_invalid_threshold() {
        let grid = PixelGrid::new(2, 2).unwrap();
        for t in [-1.0, f64::NAN, f64::INFINITY] {
            let opts = LineColorOptions::default().with_threshold(t);
            assert!(matches!(
                line_color_mask(&grid, &opts),
                Err(ColorError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn test_mask_and_render() {
        let mut grid = PixelGrid::new_filled(3, 2, Rgb::WHITE.to_pixel())
            .unwrap()
            .to_mut();
        grid.set_rgb(1, 0, 69, 27, 125).unwrap();
        grid.set_rgb(2, 1, 80, 30, 120).unwrap();
        let grid: PixelGrid = grid.into();

        let mask = line_color_mask(&grid, &LineColorOptions::default()).unwrap();
        assert_eq!(mask.count_false(), 2);
        assert_eq!(mask.get(1, 0), Some(false));
        assert_eq!(mask.get(0, 0), Some(true));

        let map = render_mask(&mask).unwrap();
        assert_eq!(map.get_rgb(1, 0), Some((0, 0, 0)));
        assert_eq!(map.get_rgb(0, 0), Some((255, 255, 255)));
    }
}
