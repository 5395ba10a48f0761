mod common;

use std::fs;

use stickerpress::config::{OutputPaths, SheetConfig};
use stickerpress::sheet::compose_sheet;

#[test]
fn twenty_three_images_make_three_pages() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::under(dir.path());
    common::write_sticker_dir(&paths.sticker_dir, 23);

    let report = compose_sheet(&paths, &SheetConfig::default()).unwrap();

    assert_eq!(report.images_found, 23);
    assert_eq!(report.images_placed, 23);
    assert_eq!(report.pages, 3);
    assert!(report.warnings.is_empty());

    let pdf = fs::read(&paths.pdf).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert_eq!(common::pdf_page_count(&pdf), 3);

    let preview = image::open(&paths.preview).unwrap();
    assert_eq!((preview.width(), preview.height()), (612, 792));
    assert_eq!(report.preview_size, (612, 792));
}

#[test]
fn cap_limits_placed_images() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::under(dir.path());
    common::write_sticker_dir(&paths.sticker_dir, 15);
    let config = SheetConfig {
        max_images: 12,
        ..SheetConfig::default()
    };

    let report = compose_sheet(&paths, &config).unwrap();

    assert_eq!(report.images_found, 15);
    assert_eq!(report.images_placed, 12);
    assert_eq!(report.images_ignored.len(), 3);
    assert_eq!(report.pages, 2);
    assert!(report.images_ignored[0].ends_with("012.png"));
}

#[test]
fn non_image_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::under(dir.path());
    common::write_sticker_dir(&paths.sticker_dir, 2);
    fs::write(paths.sticker_dir.join("README.txt"), "notes").unwrap();
    fs::write(paths.sticker_dir.join("data.csv"), "a,b").unwrap();

    let report = compose_sheet(&paths, &SheetConfig::default()).unwrap();
    assert_eq!(report.images_found, 2);
}

#[test]
fn wrong_aspect_ratio_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::under(dir.path());
    fs::create_dir_all(&paths.sticker_dir).unwrap();
    image::RgbImage::new(10, 10)
        .save_with_format(paths.sticker_dir.join("square.png"), image::ImageFormat::Png)
        .unwrap();

    let report = compose_sheet(&paths, &SheetConfig::default()).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(report.to_string().contains("will be stretched"));
}

#[test]
fn alternate_page_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let paths = OutputPaths::under(dir.path());
    common::write_sticker_dir(&paths.sticker_dir, 7);
    let config = SheetConfig {
        columns: 1,
        rows: 3,
        preview_dpi: 36.0,
        ..SheetConfig::default()
    };

    let report = compose_sheet(&paths, &config).unwrap();
    assert_eq!(report.pages, 3);
    assert_eq!(report.preview_size, (306, 396));
}
