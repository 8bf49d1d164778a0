//! The split pipeline
//!
//! One run goes loader → classifier → labeler → filter → cropper, each stage
//! finishing before the next starts. Scratch data (mask, visited set,
//! component list) lives only inside the run.

use crate::config::SplitConfig;
use crate::crop::{ProcessedImage, crop_boxes, order_boxes};
use crate::error::{SplitError, SplitResult};
use std::fmt;
use std::path::Path;
use zwds_color::{line_color_mask, render_mask};
use zwds_core::PixelGrid;
use zwds_region::{ConnectivityType, find_connected_components, select_chart_boxes};

/// Pipeline phase, reported to progress callbacks as it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingStep {
    ReadingImage,
    GeneratingCutOutMap,
    LabelingRegions,
    FilteringBoxes,
    CroppingImages,
    Done,
}

impl fmt::Display for ProcessingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ProcessingStep::ReadingImage => "reading image",
            ProcessingStep::GeneratingCutOutMap => "generating cut-out map",
            ProcessingStep::LabelingRegions => "labeling regions",
            ProcessingStep::FilteringBoxes => "filtering boxes",
            ProcessingStep::CroppingImages => "cropping images",
            ProcessingStep::Done => "done",
        };
        f.write_str(text)
    }
}

/// Split a decoded chart into its boxes.
///
/// On success the result holds exactly `config.expected_box_count` crops
/// in reading order, with `index` running from 0.
///
/// # Errors
///
/// See [`SplitError`]. A failed run returns no crops at all.
pub fn split_chart(grid: &PixelGrid, config: &SplitConfig) -> SplitResult<Vec<ProcessedImage>> {
    split_chart_with_progress(grid, config, |_| {})
}

/// [`split_chart`], calling `progress` as each phase begins.
pub fn split_chart_with_progress<F>(
    grid: &PixelGrid,
    config: &SplitConfig,
    mut progress: F,
) -> SplitResult<Vec<ProcessedImage>>
where
    F: FnMut(ProcessingStep),
{
    config.validate()?;
    run(grid, config, &mut progress)
}

/// Read a chart image from disk and split it.
///
/// # Errors
///
/// Returns [`SplitError::ImageLoadFailure`] if the file cannot be read or
/// decoded, before any other work is done.
pub fn split_chart_file<P: AsRef<Path>>(
    path: P,
    config: &SplitConfig,
) -> SplitResult<Vec<ProcessedImage>> {
    split_chart_file_with_progress(path, config, |_| {})
}

/// [`split_chart_file`], calling `progress` as each phase begins.
pub fn split_chart_file_with_progress<P, F>(
    path: P,
    config: &SplitConfig,
    mut progress: F,
) -> SplitResult<Vec<ProcessedImage>>
where
    P: AsRef<Path>,
    F: FnMut(ProcessingStep),
{
    config.validate()?;
    progress(ProcessingStep::ReadingImage);
    let grid = zwds_io::read_image(path).map_err(SplitError::ImageLoadFailure)?;
    run(&grid, config, &mut progress)
}

/// Decode an in-memory chart image and split it.
pub fn split_chart_bytes(data: &[u8], config: &SplitConfig) -> SplitResult<Vec<ProcessedImage>> {
    split_chart_bytes_with_progress(data, config, |_| {})
}

/// [`split_chart_bytes`], calling `progress` as each phase begins.
pub fn split_chart_bytes_with_progress<F>(
    data: &[u8],
    config: &SplitConfig,
    mut progress: F,
) -> SplitResult<Vec<ProcessedImage>>
where
    F: FnMut(ProcessingStep),
{
    config.validate()?;
    progress(ProcessingStep::ReadingImage);
    let grid = zwds_io::read_image_mem(data).map_err(SplitError::ImageLoadFailure)?;
    run(&grid, config, &mut progress)
}

/// Render the line/background classification of a chart.
///
/// Line pixels are black and background pixels white.
pub fn cut_out_map(grid: &PixelGrid, config: &SplitConfig) -> SplitResult<PixelGrid> {
    config.validate()?;
    let mask = line_color_mask(grid, &config.line_color_options())?;
    Ok(render_mask(&mask)?)
}

fn run(
    grid: &PixelGrid,
    config: &SplitConfig,
    progress: &mut dyn FnMut(ProcessingStep),
) -> SplitResult<Vec<ProcessedImage>> {
    progress(ProcessingStep::GeneratingCutOutMap);
    let mask = line_color_mask(grid, &config.line_color_options())?;

    progress(ProcessingStep::LabelingRegions);
    let components = find_connected_components(&mask, ConnectivityType::FourWay);

    progress(ProcessingStep::FilteringBoxes);
    let boxes = select_chart_boxes(
        components,
        grid.width(),
        grid.height(),
        &config.box_filter_options(),
    )?;

    progress(ProcessingStep::CroppingImages);
    let ordered = order_boxes(boxes);
    let images = crop_boxes(grid, &ordered, config.jpeg_quality)?;

    progress(ProcessingStep::Done);
    log::info!(
        "split {}x{} chart into {} boxes",
        grid.width(),
        grid.height(),
        images.len()
    );
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zwds_core::Rgb;

    #[test]
    fn test_steps_in_order() {
        let grid = PixelGrid::new_filled(100, 100, Rgb::WHITE.to_pixel()).unwrap();
        let mut steps = Vec::new();
        let result = split_chart_with_progress(&grid, &SplitConfig::default(), |s| steps.push(s));
        assert!(result.is_err());
        assert_eq!(
            steps,
            vec![
                ProcessingStep::GeneratingCutOutMap,
                ProcessingStep::LabelingRegions,
                ProcessingStep::FilteringBoxes,
            ]
        );
    }

    #[test]
    fn test_invalid_config_does_no_work() {
        let grid = PixelGrid::new(10, 10).unwrap();
        let config = SplitConfig::default().with_expected_box_count(0);
        let mut steps = Vec::new();
        let result = split_chart_with_progress(&grid, &config, |s| steps.push(s));
        assert!(matches!(result, Err(SplitError::InvalidConfig(_))));
        assert!(steps.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = split_chart_file("/nonexistent/chart.png", &SplitConfig::default());
        assert!(matches!(result, Err(SplitError::ImageLoadFailure(_))));
    }

    #[test]
    fn test_undecodable_bytes() {
        let result = split_chart_bytes(b"not an image at all", &SplitConfig::default());
        assert!(matches!(result, Err(SplitError::ImageLoadFailure(_))));
    }

    #[test]
    fn test_bytes_report_reading_first() {
        let mut steps = Vec::new();
        let result =
            split_chart_bytes_with_progress(b"garbage", &SplitConfig::default(), |s| steps.push(s));
        assert!(matches!(result, Err(SplitError::ImageLoadFailure(_))));
        assert_eq!(steps, vec![ProcessingStep::ReadingImage]);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(ProcessingStep::GeneratingCutOutMap.to_string(), "generating cut-out map");
    }
}
