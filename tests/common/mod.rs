#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

pub const HEADER: &str = "First Name,Last Name,Email,Company";

/// A roster with `n` complete rows named `Person{i} Tester{i}`.
pub fn roster_csv(n: usize) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in 0..n {
        csv.push_str(&format!(
            "Person{i},Tester{i},person{i}@example.org,Company {i}\n"
        ));
    }
    csv
}

pub fn write_roster(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write roster");
}

/// Writes a small solid PNG with the sticker's 7:4 proportions.
pub fn write_sticker_png(path: &Path, shade: u8) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(35, 20, Rgb([shade, shade, 255]))
        .save_with_format(path, ImageFormat::Png)
        .expect("write png");
}

/// Fills `dir` with `n` sticker images named `000.png`, `001.png`, ...
pub fn write_sticker_dir(dir: &Path, n: usize) {
    for i in 0..n {
        write_sticker_png(&dir.join(format!("{i:03}.png")), (i * 10 % 256) as u8);
    }
}

/// Counts page objects in a PDF written by the sheet compositor.
pub fn pdf_page_count(bytes: &[u8]) -> usize {
    let count = |needle: &[u8]| {
        bytes
            .windows(needle.len())
            .filter(|window| *window == needle)
            .count()
    };
    count(b"/Type /Page") - count(b"/Type /Pages")
}
