//! Sheet report: what was found, placed and written.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::collect::AspectWarning;

#[derive(Clone, Debug, Serialize)]
pub struct SheetReport {
    pub sticker_dir: PathBuf,
    pub pdf: PathBuf,
    pub preview: PathBuf,
    pub images_found: usize,
    pub images_placed: usize,
    /// Images beyond the cap, in file-name order.
    pub images_ignored: Vec<PathBuf>,
    pub pages: usize,
    pub border: bool,
    /// Pixel size of the preview image.
    pub preview_size: (u32, u32),
    pub warnings: Vec<AspectWarning>,
}

impl fmt::Display for SheetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Found {} images in '{}'",
            self.images_found,
            self.sticker_dir.display()
        )?;
        if !self.images_ignored.is_empty() {
            writeln!(
                f,
                "  {} images over the limit were not placed",
                self.images_ignored.len()
            )?;
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", self.warnings.len())?;
            for warning in &self.warnings {
                writeln!(
                    f,
                    "  - {} is {}x{} ({:.2}:1), will be stretched to {:.2}:1",
                    warning.image.display(),
                    warning.width,
                    warning.height,
                    warning.aspect,
                    warning.expected
                )?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Placed {} stickers on {} page(s){}: {}",
            self.images_placed,
            self.pages,
            if self.border { " with borders" } else { "" },
            self.pdf.display()
        )?;
        writeln!(
            f,
            "Preview of page 1 ({}x{}): {}",
            self.preview_size.0,
            self.preview_size.1,
            self.preview.display()
        )
    }
}
