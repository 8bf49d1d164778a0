//! Cropping, ordering and export
//!
//! Validated boxes are put into reading order (top edge, then left edge,
//! then discovery order), cut out of the source grid pixel for pixel and
//! encoded as JPEG. Crops read disjoint parts of a shared read-only grid,
//! so they are cut and encoded in parallel.

use crate::error::{SplitError, SplitResult};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use zwds_core::{BoundingBox, PixelGrid};
use zwds_io::IoResult;
use zwds_region::ConnectedComponent;

/// One cropped box of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    /// Position in reading order, starting at 0
    pub index: usize,
    /// Where the crop was taken from in the source image
    pub bounds: BoundingBox,
    /// The cropped pixels, exactly as in the source
    pub pixels: PixelGrid,
    /// JPEG encoding of `pixels`
    pub data: Vec<u8>,
    /// `zwds_box_{index + 1}.jpg`
    pub filename: String,
}

impl ProcessedImage {
    /// Write the encoded crop into `dir` under its filename.
    ///
    /// Returns the path written.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> IoResult<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        fs::write(&path, &self.data)?;
        log::debug!("wrote {} ({} bytes)", path.display(), self.data.len());
        Ok(path)
    }
}

/// Output filename for the box at `index`; numbering starts at 1.
pub fn box_filename(index: usize) -> String {
    format!("zwds_box_{}.jpg", index + 1)
}

/// Sort boxes into reading order.
///
/// Boxes with the same top-left corner keep their discovery order, whatever
/// order they arrive in.
pub fn order_boxes(mut boxes: Vec<ConnectedComponent>) -> Vec<ConnectedComponent> {
    boxes.sort_unstable_by(|a, b| {
        a.bounds
            .cmp_reading_order(&b.bounds)
            .then(a.label.cmp(&b.label))
    });
    boxes
}

/// Cut out and encode `boxes` in the order given.
///
/// # Errors
///
/// Returns [`SplitError::RenderingFailure`] if a box does not fit in the
/// grid or a crop cannot be encoded.
pub fn crop_boxes(
    grid: &PixelGrid,
    boxes: &[ConnectedComponent],
    quality: u8,
) -> SplitResult<Vec<ProcessedImage>> {
    boxes
        .par_iter()
        .enumerate()
        .map(|(index, comp)| -> SplitResult<ProcessedImage> {
            let pixels = grid.clip_box(&comp.bounds).map_err(|e| {
                SplitError::RenderingFailure(format!("crop {}: {}", index + 1, e))
            })?;
            let data = zwds_io::encode_jpeg(&pixels, quality).map_err(|e| {
                SplitError::RenderingFailure(format!("encode {}: {}", index + 1, e))
            })?;
            Ok(ProcessedImage {
                index,
                bounds: comp.bounds,
                pixels,
                data,
                filename: box_filename(index),
            })
        })
        .collect()
}

/// Write every crop into `dir`, creating it if needed.
pub fn write_images<P: AsRef<Path>>(images: &[ProcessedImage], dir: P) -> IoResult<Vec<PathBuf>> {
    fs::create_dir_all(dir.as_ref())?;
    images.iter().map(|image| image.write_to_dir(&dir)).collect()
}

/// Pack the crops into one zip archive, one entry per crop.
pub fn archive_bytes(images: &[ProcessedImage]) -> IoResult<Vec<u8>> {
    let cursor = zwds_io::write_zip(
        std::io::Cursor::new(Vec::new()),
        images.iter().map(|i| (i.filename.as_str(), i.data.as_slice())),
    )?;
    Ok(cursor.into_inner())
}

/// Pack the crops into a zip archive at `path`.
///
/// [`DEFAULT_ARCHIVE_NAME`](zwds_io::DEFAULT_ARCHIVE_NAME) is the usual
/// file name.
pub fn write_archive<P: AsRef<Path>>(images: &[ProcessedImage], path: P) -> IoResult<()> {
    zwds_io::write_zip_file(
        path,
        images.iter().map(|i| (i.filename.as_str(), i.data.as_slice())),
    )
}
