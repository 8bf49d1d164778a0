//! Connected component analysis
//!
//! Finds the maximal connected regions of `true` pixels in a [`Mask`] by
//! breadth-first search. Components are reported in the order a row-major
//! scan (y outer, x inner) first meets them, and that order is their label.

use std::collections::VecDeque;
use zwds_core::{BoundingBox, Mask};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A connected component of background pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Discovery index, starting at 0
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u64,
    /// Bounding box of this component
    pub bounds: BoundingBox,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: u64, bounds: BoundingBox) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

/// One bit per pixel, set once a pixel has been queued.
struct VisitedSet {
    width: usize,
    bits: Vec<u64>,
}

impl VisitedSet {
    fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width: width as usize,
            bits: vec![0; len.div_ceil(64)],
        }
    }

    /// Mark `(x, y)`; returns `false` if it was already marked.
    #[inline]
    fn insert(&mut self, x: u32, y: u32) -> bool {
        let i = y as usize * self.width + x as usize;
        let (word, bit) = (i / 64, 1u64 << (i % 64));
        let fresh = self.bits[word] & bit == 0;
        self.bits[word] |= bit;
        fresh
    }
}

const FOUR_WAY: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const EIGHT_WAY: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Find all connected components of `true` pixels in a mask.
///
/// Every pixel is visited exactly once, so the scan is O(W·H) in time and
/// space. A mask with no `true` pixel yields an empty vector.
///
/// # Examples
///
/// ```
/// use zwds_core::Mask;
/// use zwds_region::{ConnectivityType, find_connected_components};
///
/// let mut mask = Mask::new(5, 5).unwrap();
/// mask.set(0, 0, true).unwrap();
/// mask.set(1, 1, true).unwrap();
///
/// let four = find_connected_components(&mask, ConnectivityType::FourWay);
/// let eight = find_connected_components(&mask, ConnectivityType::EightWay);
/// assert_eq!(four.len(), 2);
/// assert_eq!(eight.len(), 1);
/// ```
pub fn find_connected_components(
    mask: &Mask,
    connectivity: ConnectivityType,
) -> Vec<ConnectedComponent> {
    let width = mask.width();
    let height = mask.height();
    let neighbors: &[(i32, i32)] = match connectivity {
        ConnectivityType::FourWay => &FOUR_WAY,
        ConnectivityType::EightWay => &EIGHT_WAY,
    };

    let mut visited = VisitedSet::new(width, height);
    let mut queue = VecDeque::new();
    let mut components = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if !mask.get_unchecked(x, y) || !visited.insert(x, y) {
                continue;
            }

            let mut bounds = BoundingBox::from_point(x, y);
            let mut pixel_count = 0u64;
            queue.push_back((x, y));

            while let Some((cx, cy)) = queue.pop_front() {
                pixel_count += 1;
                bounds.include(cx, cy);

                for &(dx, dy) in neighbors {
                    let nx = cx as i64 + dx as i64;
                    let ny = cy as i64 + dy as i64;
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    if mask.get_unchecked(nx, ny) && visited.insert(nx, ny) {
                        queue.push_back((nx, ny));
                    }
                }
            }

            components.push(ConnectedComponent::new(
                components.len() as u32,
                pixel_count,
                bounds,
            ));
        }
    }

    log::debug!(
        "{:?} labeling of {}x{} mask: {} components",
        connectivity,
        width,
        height,
        components.len()
    );

    components
}

/// Count connected components without keeping their bounds.
pub fn count_connected_components(mask: &Mask, connectivity: ConnectivityType) -> usize {
    find_connected_components(mask, connectivity).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut mask = Mask::new(width, height).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                mask.set(x as u32, y as u32, c == '#').unwrap();
            }
        }
        mask
    }

    #[test]
    fn test_all_foreground_is_empty() {
        let mask = Mask::new(8, 3).unwrap();
        assert!(find_connected_components(&mask, ConnectivityType::FourWay).is_empty());
    }

    #[test]
    fn test_all_background_is_one() {
        let mask = Mask::filled(7, 5, true).unwrap();
        let comps = find_connected_components(&mask, ConnectivityType::FourWay);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count, 35);
        assert_eq!(comps[0].bounds, BoundingBox::new(0, 0, 6, 4).unwrap());
    }

    #[test]
    fn test_single_pixel() {
        let mask = mask_from_rows(&["...", ".#.", "..."]);
        let comps = find_connected_components(&mask, ConnectivityType::FourWay);
        assert_eq!(comps.len(), 1);
        let b = comps[0].bounds;
        assert_eq!((b.width(), b.height(), b.area()), (1, 1, 1));
    }

    #[test]
    fn test_diagonal_connectivity() {
        let mask = mask_from_rows(&["#..", ".#.", "..#"]);
        assert_eq!(
            count_connected_components(&mask, ConnectivityType::FourWay),
            3
        );
        assert_eq!(
            count_connected_components(&mask, ConnectivityType::EightWay),
            1
        );
    }

    #[test]
    fn test_discovery_order() {
        // The U shape is first met at (4, 0); the dot at (1, 1) comes later
        let mask = mask_from_rows(&[
            "....#.#", //
            ".#..#.#", //
            "....###", //
        ]);
        let comps = find_connected_components(&mask, ConnectivityType::FourWay);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].label, 0);
        assert_eq!(comps[0].bounds, BoundingBox::new(4, 0, 6, 2).unwrap());
        assert_eq!(comps[0].pixel_count, 7);
        assert_eq!(comps[1].label, 1);
        assert_eq!(comps[1].bounds, BoundingBox::from_point(1, 1));
    }

    #[test]
    fn test_wide_mask_crosses_words() {
        let mut mask = Mask::new(100, 2).unwrap();
        for x in 0..100 {
            mask.set(x, 1, true).unwrap();
        }
        let comps = find_connected_components(&mask, ConnectivityType::FourWay);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].pixel_count, 100);
    }
}
