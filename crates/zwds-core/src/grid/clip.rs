//! Rectangular extraction
//!
//! Crops are pixel-exact copies: no resampling, no scaling. The result
//! is an independent grid that shares nothing with the source.

use super::{GridData, PixelGrid};
use crate::bbox::BoundingBox;
use crate::error::{Error, Result};
use std::sync::Arc;

impl PixelGrid {
    /// Copy the pixels covered by `region` into a new grid.
    ///
    /// The result is `region.width()` x `region.height()` and keeps the
    /// source's samples per pixel and input format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the region extends past the grid;
    /// unlike a clipping crop, a partial region is never silently shrunk.
    pub fn clip_box(&self, region: &BoundingBox) -> Result<PixelGrid> {
        if !region.fits_within(self.width(), self.height()) {
            return Err(Error::OutOfBounds {
                x: region.max_x,
                y: region.max_y,
                width: self.width(),
                height: self.height(),
            });
        }

        let w = region.width() as usize;
        let h = region.height() as usize;
        let mut data = Vec::with_capacity(w * h);
        for y in region.min_y..=region.max_y {
            let row = self.row(y);
            data.extend_from_slice(&row[region.min_x as usize..=region.max_x as usize]);
        }

        Ok(PixelGrid {
            inner: Arc::new(GridData {
                width: region.width(),
                height: region.height(),
                spp: self.spp(),
                informat: self.informat(),
                data,
            }),
        })
    }

    /// Copy the `w` x `h` rectangle whose top-left corner is `(x, y)`.
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<PixelGrid> {
        let region = BoundingBox::from_origin_size(x, y, w, h)?;
        self.clip_box(&region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height)
            .unwrap()
            .try_into_mut()
            .unwrap();
        for y in 0..height {
            for x in 0..width {
                grid.set_pixel(x, y, y * 1000 + x).unwrap();
            }
        }
        grid.into()
    }

    #[test]
    fn test_clip_box_exact() {
        let grid = gradient(10, 8);
        let region = BoundingBox::new(2, 3, 5, 4).unwrap();
        let crop = grid.clip_box(&region).unwrap();

        assert_eq!(crop.width(), 4);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.get_pixel(0, 0), Some(3002));
        assert_eq!(crop.get_pixel(3, 1), Some(4005));
    }

    #[test]
    fn test_clip_whole_image() {
        let grid = gradient(3, 3);
        let crop = grid.clip_rectangle(0, 0, 3, 3).unwrap();
        assert_eq!(crop, grid);
        // Independent buffer
        assert_eq!(grid.ref_count(), 1);
    }

    #[test]
    fn test_clip_out_of_bounds() {
        let grid = gradient(4, 4);
        assert!(grid.clip_rectangle(2, 2, 3, 1).is_err());
        assert!(grid.clip_rectangle(0, 0, 0, 1).is_err());
    }
}
