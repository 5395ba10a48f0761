//! Sticker image discovery.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::SheetConfig;
use crate::error::StickerPressError;

/// Relative aspect-ratio deviation tolerated before an image is flagged.
const ASPECT_TOLERANCE: f64 = 0.02;

/// Images found in the sticker directory.
#[derive(Clone, Debug, Default)]
pub struct CollectedImages {
    /// Images to place, sorted by file name and capped.
    pub selected: Vec<PathBuf>,
    /// Images left out because of the cap.
    pub ignored: Vec<PathBuf>,
}

impl CollectedImages {
    pub fn found(&self) -> usize {
        self.selected.len() + self.ignored.len()
    }
}

/// Lists the sticker images directly inside `dir`.
///
/// Only regular files whose extension is in the allow-list are taken;
/// subdirectories are not descended into. Results are sorted by file name and
/// the first `max_images` are selected.
pub fn collect_images(dir: &Path, config: &SheetConfig) -> Result<CollectedImages, StickerPressError> {
    if !dir.is_dir() {
        return Err(StickerPressError::StickerDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| StickerPressError::StickerDirRead {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), &config.extensions) {
            files.push(entry.into_path());
        }
    }

    let ignored = if files.len() > config.max_images {
        files.split_off(config.max_images)
    } else {
        Vec::new()
    };

    if !ignored.is_empty() {
        tracing::warn!(
            "{} images exceed the limit of {} and will not be placed",
            ignored.len(),
            config.max_images
        );
    }

    Ok(CollectedImages {
        selected: files,
        ignored,
    })
}

fn has_extension(path: &Path, allowed: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}

/// An image whose proportions differ from the printed sticker's, so it will
/// be visibly stretched.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AspectWarning {
    pub image: PathBuf,
    pub width: usize,
    pub height: usize,
    pub aspect: f64,
    pub expected: f64,
}

/// Reads image headers and flags images that will be distorted.
///
/// Unreadable headers are logged and skipped here; the PDF writer decodes
/// each image fully and reports real failures.
pub fn aspect_warnings(images: &[PathBuf], config: &SheetConfig) -> Vec<AspectWarning> {
    let expected = config.sticker_aspect();
    let mut warnings = Vec::new();

    for image in images {
        let size = match imagesize::size(image) {
            Ok(size) => size,
            Err(err) => {
                tracing::debug!("could not read header of {}: {}", image.display(), err);
                continue;
            }
        };
        if size.width == 0 || size.height == 0 {
            continue;
        }

        let aspect = size.width as f64 / size.height as f64;
        if ((aspect - expected) / expected).abs() > ASPECT_TOLERANCE {
            tracing::warn!(
                "{} is {}x{} and will be stretched to {:.2}:1",
                image.display(),
                size.width,
                size.height,
                expected
            );
            warnings.push(AspectWarning {
                image: image.clone(),
                width: size.width,
                height: size.height,
                aspect,
                expected,
            });
        }
    }

    warnings
}
