//! zwds-io - Image I/O for the ZWDS chart splitter
//!
//! This crate is the pixel buffer loader and the export side of the
//! pipeline:
//!
//! - **Reading**: PNG, JPEG and WebP, detected by magic bytes
//! - **Writing**: JPEG (crop output) and PNG (lossless diagnostics)
//! - **Packaging**: zip archives of encoded crops
//!
//! Each format sits behind a cargo feature, all enabled by default.

pub mod error;
pub mod format;

#[cfg(feature = "archive")]
pub mod archive;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "webp-format")]
pub mod webp;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use zwds_core::ImageFormat;

#[cfg(feature = "archive")]
pub use archive::{DEFAULT_ARCHIVE_NAME, write_zip, write_zip_file};
#[cfg(feature = "jpeg")]
pub use jpeg::{DEFAULT_JPEG_QUALITY, encode_jpeg, read_jpeg, write_jpeg};
#[cfg(feature = "png-format")]
pub use self::png::{read_png, write_png};
#[cfg(feature = "webp-format")]
pub use webp::read_webp;

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use zwds_core::PixelGrid;

/// Read an image from a file path.
///
/// The format is sniffed from the file header, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let grid = read_image_mem(&data)?;
    log::debug!(
        "read {} ({}x{}, {:?})",
        path.display(),
        grid.width(),
        grid.height(),
        grid.informat()
    );
    Ok(grid)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<PixelGrid> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "webp-format")]
        ImageFormat::WebP => webp::read_webp(cursor),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an image to a file path.
///
/// JPEG output uses [`DEFAULT_JPEG_QUALITY`] when the `jpeg` feature is on.
pub fn write_image<P: AsRef<Path>>(
    grid: &PixelGrid,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_to(grid, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(grid: &PixelGrid, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_to(grid, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_to<W: Write>(grid: &PixelGrid, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(grid, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(grid, writer, DEFAULT_JPEG_QUALITY),
        other => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not supported",
            other
        ))),
    }
}
