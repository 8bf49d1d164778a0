//! I/O formats regression test
//!
//! Format detection plus decode/encode round trips through the loader for
//! every supported input format.
//!
//! Run with:
//! ```
//! cargo test -p zwds-io --test ioformats_reg
//! ```

use zwds_core::{PixelGrid, Rgb};
use zwds_io::{
    ImageFormat, IoError, detect_format, detect_format_from_bytes, read_image, read_image_mem,
    write_image, write_image_mem,
};
use zwds_test::{RegParams, SyntheticChart};

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");
    let chart = SyntheticChart::new(120, 90).with_markers(true).build().unwrap();

    // --- PNG: lossless ---
    let png = write_image_mem(&chart.grid, ImageFormat::Png).unwrap();
    rp.compare_values(
        1.0,
        (detect_format_from_bytes(&png).unwrap() == ImageFormat::Png) as u8 as f64,
        0.0,
    );
    let decoded = read_image_mem(&png).unwrap();
    assert_eq!(decoded.informat(), ImageFormat::Png);
    rp.compare_grids(&chart.grid, &decoded);

    // --- PNG with alpha keeps its samples ---
    let mut rgba = Vec::new();
    for i in 0..(8 * 8) {
        rgba.extend_from_slice(&[69, 27, 125, (i * 4) as u8]);
    }
    let translucent = PixelGrid::from_rgba_bytes(8, 8, &rgba).unwrap();
    let decoded = read_image_mem(&write_image_mem(&translucent, ImageFormat::Png).unwrap()).unwrap();
    assert!(decoded.has_alpha());
    rp.compare_strings(&rgba, &decoded.to_rgba_bytes());

    // --- JPEG: lossy, same geometry ---
    let jpeg = write_image_mem(&chart.grid, ImageFormat::Jpeg).unwrap();
    rp.compare_values(
        1.0,
        (detect_format_from_bytes(&jpeg).unwrap() == ImageFormat::Jpeg) as u8 as f64,
        0.0,
    );
    let decoded = read_image_mem(&jpeg).unwrap();
    rp.compare_values(120.0, decoded.width() as f64, 0.0);
    rp.compare_values(90.0, decoded.height() as f64, 0.0);
    let (r, g, b) = decoded.get_rgb(0, 0).unwrap();
    let d = Rgb::new(r, g, b).distance(Rgb::WHITE);
    rp.compare_values(0.0, d, 8.0);

    // --- WebP: lossless, encoded with image-webp ---
    let mut webp = Vec::new();
    image_webp::WebPEncoder::new(&mut webp)
        .encode(&chart.grid.to_rgb_bytes(), 120, 90, image_webp::ColorType::Rgb8)
        .unwrap();
    rp.compare_values(
        1.0,
        (detect_format_from_bytes(&webp).unwrap() == ImageFormat::WebP) as u8 as f64,
        0.0,
    );
    let decoded = read_image_mem(&webp).unwrap();
    assert_eq!(decoded.informat(), ImageFormat::WebP);
    rp.compare_grids(&chart.grid, &decoded);

    // --- Files: the header decides, not the extension ---
    let dir = std::env::temp_dir().join(format!("zwds_ioformats_reg_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let misnamed = dir.join("chart.jpg");
    write_image(&chart.grid, &misnamed, ImageFormat::Png).unwrap();
    assert_eq!(detect_format(&misnamed).unwrap(), ImageFormat::Png);
    let decoded = read_image(&misnamed).unwrap();
    rp.compare_grids(&chart.grid, &decoded);

    // --- Garbage and unsupported input ---
    assert!(matches!(
        read_image_mem(b"GIF89a\x01\x00\x01\x00"),
        Err(IoError::UnsupportedFormat(_))
    ));
    assert!(read_image_mem(&png[..png.len() / 2]).is_err());
    assert!(read_image(dir.join("missing.png")).is_err());
    assert!(write_image_mem(&chart.grid, ImageFormat::WebP).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
    assert!(rp.cleanup(), "ioformats regression test failed");
}
