//! Zip packaging
//!
//! Bundles already-encoded images into a single zip. Entries are stored
//! without recompression (JPEG data does not deflate) and carry a fixed
//! timestamp, so the same entries always produce the same archive bytes.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Default archive name for a full set of crops.
pub const DEFAULT_ARCHIVE_NAME: &str = "zwds_chart_boxes.zip";

/// Write `(name, bytes)` entries into a zip, in iteration order.
///
/// Returns the underlying writer once the central directory is written.
///
/// # Errors
///
/// Returns [`IoError::ArchiveError`] on a duplicate entry name or any
/// write failure.
pub fn write_zip<W, I, S, B>(writer: W, entries: I) -> IoResult<W>
where
    W: Write + Seek,
    I: IntoIterator<Item = (S, B)>,
    S: AsRef<str>,
    B: AsRef<[u8]>,
{
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(writer);
    let mut count = 0usize;
    for (name, bytes) in entries {
        zip.start_file(name.as_ref(), options)
            .map_err(|e| IoError::ArchiveError(format!("{}: {}", name.as_ref(), e)))?;
        zip.write_all(bytes.as_ref())?;
        count += 1;
    }
    let writer = zip
        .finish()
        .map_err(|e| IoError::ArchiveError(e.to_string()))?;
    log::debug!("wrote zip archive with {} entries", count);
    Ok(writer)
}

/// Write a zip archive to `path`, creating or truncating the file.
pub fn write_zip_file<P, I, S, B>(path: P, entries: I) -> IoResult<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (S, B)>,
    S: AsRef<str>,
    B: AsRef<[u8]>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = write_zip(BufWriter::new(file), entries)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_zip_entries_in_order() {
        let entries = [("a.jpg", vec![1u8, 2, 3]), ("b.jpg", vec![4u8])];
        let cursor = write_zip(Cursor::new(Vec::new()), entries.iter().cloned()).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(archive.len(), 2);

        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "a.jpg");
        let mut content = Vec::new();
        first.read_to_end(&mut content).unwrap();
        assert_eq!(content, vec![1, 2, 3]);
    }

    #[test]
    fn test_zip_is_deterministic() {
        let entries = [("x.jpg", b"payload".to_vec())];
        let a = write_zip(Cursor::new(Vec::new()), entries.iter().cloned()).unwrap();
        let b = write_zip(Cursor::new(Vec::new()), entries.iter().cloned()).unwrap();
        assert_eq!(a.into_inner(), b.into_inner());
    }

    #[test]
    fn test_zip_duplicate_name() {
        let entries = [("same.jpg", vec![0u8]), ("same.jpg", vec![1u8])];
        let result = write_zip(Cursor::new(Vec::new()), entries.iter().cloned());
        assert!(matches!(result, Err(IoError::ArchiveError(_))));
    }
}
