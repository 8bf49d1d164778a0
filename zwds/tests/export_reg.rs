//! Crop export regression test
//!
//! Run with:
//! ```
//! cargo test -p zwds --test export_reg
//! ```

use std::io::{Cursor, Read};
use zwds::{
    ImageFormat, SplitConfig, archive_bytes, cut_out_map, split_chart, write_archive,
    write_images,
};
use zwds_test::{RegParams, SyntheticChart};

#[test]
fn export_reg() {
    let mut rp = RegParams::new("export");
    let chart = SyntheticChart::new(200, 200).build().unwrap();
    let images = split_chart(&chart.grid, &SplitConfig::default()).unwrap();

    // -----------------------------------------------------------
    // Zip archive: one stored entry per crop, in order
    // -----------------------------------------------------------
    let bytes = archive_bytes(&images).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
    rp.compare_values(images.len() as f64, archive.len() as f64, 0.0);
    for (i, image) in images.iter().enumerate() {
        let mut entry = archive.by_index(i).unwrap();
        rp.compare_strings(image.filename.as_bytes(), entry.name().as_bytes());
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        rp.compare_strings(&image.data, &content);
    }

    // Same crops, same archive
    rp.compare_strings(&bytes, &archive_bytes(&images).unwrap());

    // -----------------------------------------------------------
    // Individual files and archive on disk
    // -----------------------------------------------------------
    let dir = std::env::temp_dir().join(format!("zwds_export_reg_{}", std::process::id()));
    let paths = write_images(&images, &dir).unwrap();
    rp.compare_values(13.0, paths.len() as f64, 0.0);
    for (path, image) in paths.iter().zip(&images) {
        assert_eq!(path.file_name().unwrap().to_str(), Some(image.filename.as_str()));
        let decoded = zwds::io::read_image(path).unwrap();
        assert_eq!(decoded.informat(), ImageFormat::Jpeg);
        assert_eq!(decoded.width(), image.bounds.width());
        assert_eq!(decoded.height(), image.bounds.height());
    }

    let zip_path = dir.join(zwds::io::DEFAULT_ARCHIVE_NAME);
    write_archive(&images, &zip_path).unwrap();
    let on_disk = std::fs::read(&zip_path).unwrap();
    rp.compare_strings(&bytes, &on_disk);

    // -----------------------------------------------------------
    // Cut-out map
    // -----------------------------------------------------------
    let map = cut_out_map(&chart.grid, &SplitConfig::default()).unwrap();
    let b = chart.boxes[0];
    assert_eq!(map.get_rgb(b.min_x, b.min_y), Some((255, 255, 255)));
    assert_eq!(map.get_rgb(b.min_x - 1, b.min_y), Some((0, 0, 0)));
    rp.write_grid(&map, ImageFormat::Png).unwrap();

    std::fs::remove_dir_all(&dir).unwrap();
    assert!(rp.cleanup(), "export regression test failed");
}
