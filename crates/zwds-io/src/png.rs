//! PNG image format support
//!
//! Every PNG color type is normalized to 8-bit samples on read (palette
//! and low bit depths are expanded, 16-bit samples are stripped), so the
//! decoded grid is always dense RGBA.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use zwds_core::{ImageFormat, PixelGrid};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelGrid> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let channels = match (output_info.color_type, output_info.bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => 2,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format after expansion: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let width = output_info.width;
    let height = output_info.height;
    let row_bytes = width as usize * channels as usize;

    // Rows may be padded past the sample data; repack tightly
    let data = &buf[..output_info.buffer_size()];
    let packed: Vec<u8> = if output_info.line_size == row_bytes {
        data.to_vec()
    } else {
        data.chunks(output_info.line_size)
            .flat_map(|row| &row[..row_bytes])
            .copied()
            .collect()
    };

    Ok(PixelGrid::from_interleaved(
        width,
        height,
        channels,
        &packed,
        ImageFormat::Png,
    )?)
}

/// Write a PNG image
///
/// Grids with a meaningful alpha channel are written as RGBA, all others
/// as RGB.
pub fn write_png<W: Write>(grid: &PixelGrid, writer: W) -> IoResult<()> {
    let (color_type, data) = if grid.has_alpha() {
        (ColorType::Rgba, grid.to_rgba_bytes())
    } else {
        (ColorType::Rgb, grid.to_rgb_bytes())
    };

    let mut encoder = Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut grid = PixelGrid::new(5, 5).unwrap().try_into_mut().unwrap();
        for y in 0..5 {
            for x in 0..5 {
                grid.set_rgb(x, y, 255, 255, 255).unwrap();
            }
        }
        grid.set_rgb(0, 0, 255, 0, 0).unwrap();
        grid.set_rgb(1, 1, 69, 27, 125).unwrap();
        let grid: PixelGrid = grid.into();

        let mut buffer = Vec::new();
        write_png(&grid, &mut buffer).unwrap();
        let grid2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(grid2.informat(), ImageFormat::Png);
        assert!(!grid2.has_alpha());
        assert_eq!(grid2, grid);
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let bytes: Vec<u8> = (0..4 * 3 * 2).map(|v| (v * 10) as u8).collect();
        let grid = PixelGrid::from_rgba_bytes(3, 2, &bytes).unwrap();

        let mut buffer = Vec::new();
        write_png(&grid, &mut buffer).unwrap();
        let grid2 = read_png(Cursor::new(buffer)).unwrap();

        assert!(grid2.has_alpha());
        assert_eq!(grid2.to_rgba_bytes(), bytes);
    }

    #[test]
    fn test_png_grayscale_expands() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 180]).unwrap();
        }
        let grid = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(grid.get_rgb(1, 0), Some((180, 180, 180)));
    }

    #[test]
    fn test_png_garbage() {
        assert!(read_png(Cursor::new(vec![0u8; 16])).is_err());
    }
}
