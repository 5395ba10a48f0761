//! Run configuration.
//!
//! Page geometry, sticker size and file locations are fixed for the command
//! line tool, but every routine receives them through these structures so
//! tests and library callers can run alternate geometries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geom::{inches_to_pixels, inches_to_points, Coord, Points, Rect};

/// Raster geometry of a single sticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StickerConfig {
    /// Resolution the sticker is rendered at.
    pub dpi: u32,
    /// Physical sticker width in inches.
    pub width_in: f64,
    /// Physical sticker height in inches.
    pub height_in: f64,
    /// QR side length as a fraction of the canvas height.
    pub qr_ratio: f64,
    /// Vertical gap between stacked elements, in pixels.
    pub spacing_px: u32,
    /// Pixels per QR module before resizing.
    pub qr_module_px: u32,
    /// Quiet zone around the QR symbol, in modules.
    pub qr_quiet_zone: u32,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            width_in: 3.5,
            height_in: 2.0,
            qr_ratio: 0.5,
            spacing_px: 20,
            qr_module_px: 10,
            qr_quiet_zone: 4,
        }
    }
}

impl StickerConfig {
    /// Canvas width in pixels.
    pub fn width_px(&self) -> u32 {
        inches_to_pixels(self.width_in, self.dpi)
    }

    /// Canvas height in pixels.
    pub fn height_px(&self) -> u32 {
        inches_to_pixels(self.height_in, self.dpi)
    }

    /// Side length of the resized QR image in pixels.
    pub fn qr_size_px(&self) -> u32 {
        (self.height_px() as f64 * self.qr_ratio) as u32
    }
}

/// Geometry and limits of the printed sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Page width in points (US Letter by default).
    pub page_width_pt: f64,
    /// Page height in points.
    pub page_height_pt: f64,
    /// Printed sticker width in inches.
    pub sticker_width_in: f64,
    /// Printed sticker height in inches.
    pub sticker_height_in: f64,
    /// Distance from the left page edge to the first column, in inches.
    pub margin_left_in: f64,
    /// Distance from the bottom page edge to the first row, in inches.
    pub margin_bottom_in: f64,
    /// Number of sticker columns per page.
    pub columns: usize,
    /// Number of sticker rows per page.
    pub rows: usize,
    /// Maximum number of images taken from the sticker directory.
    pub max_images: usize,
    /// File extensions accepted as sticker images (case-insensitive).
    pub extensions: Vec<String>,
    /// Outline every sticker with a thin black rectangle.
    pub draw_border: bool,
    /// Rendering resolution of the preview image.
    pub preview_dpi: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            page_width_pt: 612.0,
            page_height_pt: 792.0,
            sticker_width_in: 3.5,
            sticker_height_in: 2.0,
            margin_left_in: 0.75,
            margin_bottom_in: 0.5,
            columns: 2,
            rows: 5,
            max_images: 300,
            extensions: ["png", "jpg", "jpeg"].map(String::from).to_vec(),
            draw_border: false,
            preview_dpi: 72.0,
        }
    }
}

impl SheetConfig {
    /// Number of sticker slots on one page.
    pub fn slots_per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Printed sticker width in points.
    pub fn sticker_width_pt(&self) -> f64 {
        inches_to_points(self.sticker_width_in)
    }

    /// Printed sticker height in points.
    pub fn sticker_height_pt(&self) -> f64 {
        inches_to_points(self.sticker_height_in)
    }

    /// Origin of the grid (bottom-left corner of slot 0) in points.
    pub fn grid_origin(&self) -> Coord<Points> {
        Coord::new(
            inches_to_points(self.margin_left_in),
            inches_to_points(self.margin_bottom_in),
        )
    }

    /// The full page as a rectangle.
    pub fn page_rect(&self) -> Rect<Points> {
        Rect::from_xywh(0.0, 0.0, self.page_width_pt, self.page_height_pt)
    }

    /// Aspect ratio (width / height) of a printed sticker.
    pub fn sticker_aspect(&self) -> f64 {
        self.sticker_width_in / self.sticker_height_in
    }
}

/// Default input file name when none is given on the command line.
pub const DEFAULT_ROSTER: &str = "data.csv";

/// Locations of the files the tool reads and writes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputPaths {
    /// Directory the renderer writes stickers to and the compositor reads.
    pub sticker_dir: PathBuf,
    /// Multi-page PDF written by the compositor.
    pub pdf: PathBuf,
    /// PNG preview of the first page.
    pub preview: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            sticker_dir: PathBuf::from("stickers"),
            pdf: PathBuf::from("results.pdf"),
            preview: PathBuf::from("preview.png"),
        }
    }
}

impl OutputPaths {
    /// Resolves every path against `root`.
    pub fn under(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            sticker_dir: root.join(defaults.sticker_dir),
            pdf: root.join(defaults.pdf),
            preview: root.join(defaults.preview),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "stickerpress=debug,warn").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sticker_canvas_is_business_card_at_300_dpi() {
        let config = StickerConfig::default();
        assert_eq!(config.width_px(), 1050);
        assert_eq!(config.height_px(), 600);
        assert_eq!(config.qr_size_px(), 300);
    }

    #[test]
    fn default_sheet_holds_ten_stickers_on_letter() {
        let config = SheetConfig::default();
        assert_eq!(config.slots_per_page(), 10);
        assert_eq!(config.sticker_width_pt(), 252.0);
        assert_eq!(config.sticker_height_pt(), 144.0);
        assert_eq!(config.grid_origin(), Coord::new(54.0, 36.0));
    }

    #[test]
    fn output_paths_resolve_under_root() {
        let paths = OutputPaths::under(Path::new("/tmp/run"));
        assert_eq!(paths.sticker_dir, PathBuf::from("/tmp/run/stickers"));
        assert_eq!(paths.pdf, PathBuf::from("/tmp/run/results.pdf"));
        assert_eq!(paths.preview, PathBuf::from("/tmp/run/preview.png"));
    }
}
