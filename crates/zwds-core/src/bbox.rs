//! BoundingBox - Inclusive rectangle regions
//!
//! Unlike a `(x, y, w, h)` rectangle, a `BoundingBox` stores the inclusive
//! extreme coordinates of the pixels it covers, which is what region
//! labeling naturally accumulates. Width, height and area are derived.

use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Smallest axis-aligned rectangle containing a set of pixels.
///
/// All four bounds are inclusive, so a single pixel has width and height 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Leftmost column
    pub min_x: u32,
    /// Topmost row
    pub min_y: u32,
    /// Rightmost column (inclusive)
    pub max_x: u32,
    /// Bottom row (inclusive)
    pub max_y: u32,
}

impl BoundingBox {
    /// Create a box from inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_x > max_x` or `min_y > max_y`.
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Result<Self> {
        if min_x > max_x || min_y > max_y {
            return Err(Error::InvalidParameter(format!(
                "inverted bounding box: ({}, {})..=({}, {})",
                min_x, min_y, max_x, max_y
            )));
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Create a degenerate box covering one pixel.
    pub const fn from_point(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Create a box from its top-left corner and size.
    ///
    /// # Errors
    ///
    /// Returns an error if `w` or `h` is zero.
    pub fn from_origin_size(x: u32, y: u32, w: u32, h: u32) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be positive: w={}, h={}",
                w, h
            )));
        }
        Self::new(x, y, x + (w - 1), y + (h - 1))
    }

    /// Grow the box so it also covers `(x, y)`.
    #[inline]
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Area of the rectangle (not the pixel count of the region it bounds).
    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check if this box contains another box
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Check that every bound lies inside a `width` x `height` grid.
    #[inline]
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.max_x < width && self.max_y < height
    }

    /// Order by top edge, then left edge.
    ///
    /// Boxes sharing both edges compare equal; callers that need a total
    /// order break the tie themselves.
    pub fn cmp_reading_order(&self, other: &BoundingBox) -> Ordering {
        self.min_y
            .cmp(&other.min_y)
            .then(self.min_x.cmp(&other.min_x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel() {
        let b = BoundingBox::from_point(7, 3);
        assert_eq!(b.width(), 1);
        assert_eq!(b.height(), 1);
        assert_eq!(b.area(), 1);
    }

    #[test]
    fn test_include_grows() {
        let mut b = BoundingBox::from_point(5, 5);
        b.include(2, 9);
        b.include(8, 4);
        assert_eq!(b, BoundingBox::new(2, 4, 8, 9).unwrap());
        assert_eq!(b.width(), 7);
        assert_eq!(b.height(), 6);
        assert_eq!(b.area(), 42);
    }

    #[test]
    fn test_new_rejects_inverted() {
        assert!(BoundingBox::new(3, 0, 2, 0).is_err());
        assert!(BoundingBox::new(0, 3, 0, 2).is_err());
    }

    #[test]
    fn test_from_origin_size() {
        let b = BoundingBox::from_origin_size(10, 20, 5, 1).unwrap();
        assert_eq!((b.max_x, b.max_y), (14, 20));
        assert!(BoundingBox::from_origin_size(0, 0, 0, 4).is_err());
    }

    #[test]
    fn test_containment() {
        let outer = BoundingBox::new(0, 0, 9, 9).unwrap();
        let inner = BoundingBox::new(2, 2, 4, 4).unwrap();
        let apart = BoundingBox::new(10, 10, 12, 12).unwrap();
        assert!(outer.contains_box(&inner));
        assert!(!inner.contains_box(&outer));
        assert!(outer.overlaps(&inner));
        assert!(!outer.overlaps(&apart));
        assert!(outer.fits_within(10, 10));
        assert!(!apart.fits_within(12, 13));
    }

    #[test]
    fn test_reading_order() {
        let top_right = BoundingBox::new(50, 0, 60, 5).unwrap();
        let lower_left = BoundingBox::new(0, 1, 10, 5).unwrap();
        let top_left = BoundingBox::new(0, 0, 10, 5).unwrap();
        assert_eq!(top_left.cmp_reading_order(&top_right), Ordering::Less);
        assert_eq!(top_right.cmp_reading_order(&lower_left), Ordering::Less);
        assert_eq!(top_left.cmp_reading_order(&top_left), Ordering::Equal);
    }
}
