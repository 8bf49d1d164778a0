//! Mask - Binary pixel classification
//!
//! A `Mask` holds one bit per pixel. Bits are packed MSB to LSB within
//! 32-bit words and every row starts on a word boundary, the same layout a
//! 1 bpp image uses. Padding bits past the last column are kept at zero so
//! that word-level counts stay exact.

use crate::error::{Error, Result};

/// One bit per pixel of a `width` x `height` grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// 32-bit words per row
    wpl: u32,
    data: Vec<u32>,
}

impl Mask {
    /// Create a mask with every bit cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = width.div_ceil(32);
        Ok(Self {
            width,
            height,
            wpl,
            data: vec![0u32; wpl as usize * height as usize],
        })
    }

    /// Create a mask with every bit set to `value`.
    pub fn filled(width: u32, height: u32, value: bool) -> Result<Self> {
        let mut mask = Self::new(width, height)?;
        if value {
            mask.data.fill(u32::MAX);
            mask.clear_padding();
        }
        Ok(mask)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false; masks are never zero-sized.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the bit at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_unchecked(x, y))
    }

    /// Get the bit at (x, y) without bounds checking against the width.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> bool {
        let word = self.data[(y * self.wpl + (x >> 5)) as usize];
        (word >> (31 - (x & 31))) & 1 == 1
    }

    /// Set the bit at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate is outside the mask.
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.set_unchecked(x, y, value);
        Ok(())
    }

    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: bool) {
        let idx = (y * self.wpl + (x >> 5)) as usize;
        let bit = 1u32 << (31 - (x & 31));
        if value {
            self.data[idx] |= bit;
        } else {
            self.data[idx] &= !bit;
        }
    }

    /// Number of set bits.
    pub fn count_true(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of cleared bits.
    pub fn count_false(&self) -> usize {
        self.len() - self.count_true()
    }

    /// Raw packed words, `wpl * height` of them.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    #[inline]
    pub fn wpl(&self) -> u32 {
        self.wpl
    }

    fn clear_padding(&mut self) {
        let used = self.width & 31;
        if used == 0 {
            return;
        }
        let keep = u32::MAX << (32 - used);
        let wpl = self.wpl as usize;
        for row in self.data.chunks_exact_mut(wpl) {
            row[wpl - 1] &= keep;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_clear() {
        let mask = Mask::new(40, 3).unwrap();
        assert_eq!(mask.wpl(), 2);
        assert_eq!(mask.count_true(), 0);
        assert_eq!(mask.count_false(), 120);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(Mask::new(0, 5).is_err());
        assert!(Mask::filled(5, 0, true).is_err());
    }

    #[test]
    fn test_filled_ignores_padding() {
        let mask = Mask::filled(33, 2, true).unwrap();
        assert_eq!(mask.count_true(), 66);
        assert_eq!(mask.get(32, 1), Some(true));
        assert_eq!(mask.get(33, 1), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut mask = Mask::new(70, 4).unwrap();
        mask.set(0, 0, true).unwrap();
        mask.set(31, 1, true).unwrap();
        mask.set(32, 2, true).unwrap();
        mask.set(69, 3, true).unwrap();
        assert_eq!(mask.count_true(), 4);
        assert_eq!(mask.get(31, 1), Some(true));
        assert_eq!(mask.get(30, 1), Some(false));

        mask.set(32, 2, false).unwrap();
        assert_eq!(mask.get(32, 2), Some(false));
        assert_eq!(mask.count_true(), 3);

        assert!(mask.set(70, 0, true).is_err());
    }
}
