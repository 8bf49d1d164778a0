//! Grid, mask and box regression test
//!
//! Run with:
//! ```
//! cargo test -p zwds-core --test grid_reg
//! ```

use zwds_core::{BoundingBox, Mask, PixelGrid, Rgb};
use zwds_test::{RegParams, SyntheticChart};

/// Paint each pixel with a color derived from its coordinates
fn make_gradient(w: u32, h: u32) -> PixelGrid {
    let mut grid = PixelGrid::new(w, h).unwrap().to_mut();
    for y in 0..h {
        for x in 0..w {
            grid.set_rgb(x, y, (x * 3) as u8, (y * 5) as u8, ((x + y) % 256) as u8)
                .unwrap();
        }
    }
    grid.into()
}

#[test]
fn grid_reg() {
    let mut rp = RegParams::new("grid");

    // --- Clipping copies exactly the inclusive rectangle ---
    let grid = make_gradient(64, 48);
    let region = BoundingBox::new(10, 5, 29, 24).unwrap();
    let clipped = grid.clip_box(&region).unwrap();
    rp.compare_values(20.0, clipped.width() as f64, 0.0);
    rp.compare_values(20.0, clipped.height() as f64, 0.0);
    for y in 0..clipped.height() {
        for x in 0..clipped.width() {
            assert_eq!(
                clipped.get_pixel(x, y),
                grid.get_pixel(region.min_x + x, region.min_y + y)
            );
        }
    }

    // Whole-image clip is the image
    let whole = grid.clip_box(&BoundingBox::new(0, 0, 63, 47).unwrap()).unwrap();
    rp.compare_grids(&grid, &whole);

    // One pixel past the edge is rejected
    assert!(grid.clip_box(&BoundingBox::new(0, 0, 64, 47).unwrap()).is_err());
    assert!(grid.clip_rectangle(60, 40, 4, 9).is_err());

    // --- Clipping leaves the source untouched and shares nothing ---
    let mut edited = clipped.to_mut();
    edited.set_rgb(0, 0, 1, 2, 3).unwrap();
    assert_eq!(grid.get_rgb(10, 5), Some((30, 25, 15)));

    // --- Synthetic chart boxes clip to their interiors ---
    let chart = SyntheticChart::new(200, 200).build().unwrap();
    for b in &chart.boxes {
        let crop = chart.grid.clip_box(b).unwrap();
        let white = PixelGrid::new_filled(b.width(), b.height(), Rgb::WHITE.to_pixel()).unwrap();
        rp.compare_grids(&white, &crop);
    }

    // --- Mask counts survive odd widths ---
    let mut mask = Mask::filled(33, 3, true).unwrap();
    rp.compare_values(99.0, mask.count_true() as f64, 0.0);
    mask.set(32, 2, false).unwrap();
    rp.compare_values(1.0, mask.count_false() as f64, 0.0);
    assert!(mask.set(33, 0, true).is_err());
    assert_eq!(mask.get(0, 3), None);

    assert!(rp.cleanup(), "grid regression test failed");
}
