//! Synthetic ZWDS charts
//!
//! Draws the fixed chart layout: a 4x4 grid of ruled cells whose central
//! 2x2 block is merged into one information box, leaving twelve palace
//! boxes around it. The chart sits inside a margin of plain background,
//! which becomes the single largest connected region.
//!
//! ```text
//!  +----+----+----+----+
//!  |  0 |  1 |  2 |  3 |
//!  +----+----+----+----+
//!  |  4 |         |  6 |
//!  +----+    5    +----+
//!  |  7 |         |  8 |
//!  +----+----+----+----+
//!  |  9 | 10 | 11 | 12 |
//!  +----+----+----+----+
//! ```
//!
//! Numbers are reading-order indices.

use crate::error::{TestError, TestResult};
use zwds_core::{BoundingBox, PixelGrid, Rgb, color};

/// Boxes in a well-formed chart.
pub const CHART_BOX_COUNT: usize = 13;

/// Default ruling color, `#451b7d`.
const LINE_COLOR: Rgb = Rgb::new(69, 27, 125);

/// Builder for a synthetic chart image.
#[derive(Debug, Clone)]
pub struct SyntheticChart {
    width: u32,
    height: u32,
    margin: u32,
    line_thickness: u32,
    line_color: Rgb,
    background: Rgb,
    jitter: u8,
    sliver: Option<usize>,
    markers: bool,
}

/// A drawn chart plus the geometry it was drawn with.
#[derive(Debug, Clone)]
pub struct BuiltChart {
    pub grid: PixelGrid,
    /// Interior of every box, in reading order
    pub boxes: Vec<BoundingBox>,
    /// Bounds of the outer background (the whole image)
    pub exterior: BoundingBox,
    /// Marker color painted into each box, in reading order (empty if
    /// markers are disabled)
    pub markers: Vec<Rgb>,
}

impl SyntheticChart {
    /// Start a `width` x `height` chart with a 10% margin and 2 px rulings.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margin: (width.min(height) / 10).max(1),
            line_thickness: 2,
            line_color: LINE_COLOR,
            background: Rgb::WHITE,
            jitter: 0,
            sliver: None,
            markers: false,
        }
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_line_thickness(mut self, thickness: u32) -> Self {
        self.line_thickness = thickness;
        self
    }

    pub fn with_line_color(mut self, color: Rgb) -> Self {
        self.line_color = color;
        self
    }

    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    /// Perturb each line pixel's channels by up to `amplitude`, imitating
    /// anti-aliasing and compression noise. Clamped to 20 so every line
    /// pixel stays within distance 40 of the line color.
    pub fn with_jitter(mut self, amplitude: u8) -> Self {
        self.jitter = amplitude.min(20);
        self
    }

    /// Collapse box `index` (reading order) into a 1 px wide strip of
    /// background along its left edge; the rest of it becomes line color.
    pub fn with_sliver(mut self, index: usize) -> Self {
        self.sliver = Some(index);
        self
    }

    /// Paint a small block of a distinct color inside every box.
    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    /// Marker color for box `index`: far from any plausible line color.
    pub fn marker_color(index: usize) -> Rgb {
        Rgb::new(20 + 15 * index as u8, 210, 40)
    }

    /// Draw the chart.
    ///
    /// # Errors
    ///
    /// Returns [`TestError::Layout`] when the margin and rulings leave no
    /// room for cells, or the sliver index is out of range.
    pub fn build(&self) -> TestResult<BuiltChart> {
        let t = self.line_thickness;
        let m = self.margin;
        if m == 0 || t == 0 {
            return Err(TestError::Layout(
                "margin and line thickness must be positive".to_string(),
            ));
        }
        let avail_x = self.width.saturating_sub(2 * m + t);
        let avail_y = self.height.saturating_sub(2 * m + t);
        let pitch_x = avail_x / 4;
        let pitch_y = avail_y / 4;
        if pitch_x <= t + 2 || pitch_y <= t + 2 {
            return Err(TestError::Layout(format!(
                "{}x{} with margin {} and thickness {} leaves no room for cells",
                self.width, self.height, m, t
            )));
        }
        if let Some(index) = self.sliver
            && index >= CHART_BOX_COUNT
        {
            return Err(TestError::Layout(format!("sliver index {} out of range", index)));
        }

        let boxes = self.box_layout(pitch_x, pitch_y)?;
        let chart = BoundingBox::new(m, m, m + 4 * pitch_x + t - 1, m + 4 * pitch_y + t - 1)?;

        let mut grid = PixelGrid::new_filled(self.width, self.height, self.background.to_pixel())?
            .try_into_mut()
            .map_err(|_| TestError::Layout("fresh grid is shared".to_string()))?;

        // Rulings: paint the whole chart in line color, then open the boxes
        grid.fill_box(&chart, self.line_color.to_pixel())?;
        for b in &boxes {
            grid.fill_box(b, self.background.to_pixel())?;
        }

        let mut drawn = boxes.clone();
        if let Some(index) = self.sliver {
            let b = boxes[index];
            grid.fill_box(&b, self.line_color.to_pixel())?;
            let strip = BoundingBox::new(b.min_x, b.min_y, b.min_x, b.max_y)?;
            grid.fill_box(&strip, self.background.to_pixel())?;
            drawn[index] = strip;
        }

        if self.jitter > 0 {
            let line = self.line_color.to_pixel();
            for y in chart.min_y..=chart.max_y {
                for x in chart.min_x..=chart.max_x {
                    if grid.get_pixel_unchecked(x, y) == line {
                        grid.set_pixel_unchecked(x, y, self.jittered(x, y));
                    }
                }
            }
        }

        let mut markers = Vec::new();
        if self.markers {
            for (i, b) in drawn.iter().enumerate() {
                let color = Self::marker_color(i);
                let mark = BoundingBox::new(
                    b.min_x + b.width() / 3,
                    b.min_y + b.height() / 3,
                    b.min_x + b.width() / 2,
                    b.min_y + b.height() / 2,
                )?;
                grid.fill_box(&mark, color.to_pixel())?;
                markers.push(color);
            }
        }

        Ok(BuiltChart {
            grid: grid.into(),
            boxes: drawn,
            exterior: BoundingBox::new(0, 0, self.width - 1, self.height - 1)?,
            markers,
        })
    }

    /// Interior of every box in reading order.
    fn box_layout(&self, pitch_x: u32, pitch_y: u32) -> TestResult<Vec<BoundingBox>> {
        let (m, t) = (self.margin, self.line_thickness);
        let cell = |row: u32, col: u32, span: u32| {
            BoundingBox::new(
                m + col * pitch_x + t,
                m + row * pitch_y + t,
                m + (col + span) * pitch_x - 1,
                m + (row + span) * pitch_y - 1,
            )
        };

        let mut boxes = Vec::with_capacity(CHART_BOX_COUNT);
        for row in 0..4 {
            for col in 0..4 {
                let inner = (1..=2).contains(&row) && (1..=2).contains(&col);
                if !inner {
                    boxes.push(cell(row, col, 1)?);
                } else if row == 1 && col == 1 {
                    boxes.push(cell(1, 1, 2)?);
                }
            }
        }
        Ok(boxes)
    }

    fn jittered(&self, x: u32, y: u32) -> u32 {
        let span = 2 * self.jitter as i32 + 1;
        let offset = |phase: u32| {
            let v = (x.wrapping_mul(7) ^ y.wrapping_mul(13)).wrapping_add(phase) as i32;
            v.rem_euclid(span) - self.jitter as i32
        };
        let shift = |c: u8, d: i32| (c as i32 + d).clamp(0, 255) as u8;
        color::compose_rgb(
            shift(self.line_color.r, offset(0)),
            shift(self.line_color.g, offset(5)),
            shift(self.line_color.b, offset(11)),
        )
    }
}
