//! Sticker renderer.
//!
//! Turns each roster row into a business-card-sized PNG: the uppercased
//! first name in large type, a QR code carrying a vCard, and the uppercased
//! last name in small type, stacked and centered.
//!
//! Rows are processed in roster order and independently. A row that cannot
//! be rendered is recorded in the [`RenderReport`] and the run moves on; only
//! failing to create the output directory aborts the run.

mod compose;
mod font;
mod glyphs;
mod qr;
mod report;
pub mod vcard;

pub use compose::{compose_sticker, plan_sticker, DisplayNames, StickerLayout};
pub use font::{FontSearch, FontSet, FontTier, TextBox, Typeface, FONT_DIR_ENV};
pub use qr::generate_qr;
pub use report::{RenderReport, RenderedSticker, SkipKind, SkipReason, SkippedRow};
pub use vcard::ContactPayload;

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use thiserror::Error;

use crate::config::StickerConfig;
use crate::error::StickerPressError;
use crate::roster::{AttendeeRecord, Roster};

/// A failure confined to a single roster row.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("payload of {payload_len} bytes does not fit in a QR code: {source}")]
    QrEncoding {
        payload_len: usize,
        #[source]
        source: qrcode::types::QrError,
    },

    #[error("failed to encode PNG: {source}")]
    Encode {
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RenderError> for SkipReason {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::QrEncoding { .. } => SkipReason::QrEncoding {
                message: err.to_string(),
            },
            RenderError::Encode { .. } | RenderError::Write { .. } => SkipReason::ImageWrite {
                message: err.to_string(),
            },
        }
    }
}

/// Renders the sticker image for one attendee without touching the disk.
pub fn render_sticker(
    record: &AttendeeRecord,
    fonts: &FontSet,
    config: &StickerConfig,
) -> Result<RgbImage, RenderError> {
    let payload = ContactPayload::from_record(record);
    let qr = generate_qr(&payload, config)?;
    let names = DisplayNames {
        primary: record.display_first(),
        secondary: record.display_last(),
    };
    Ok(compose_sticker(&names, &qr, fonts, config))
}

/// Renders one attendee and writes the sticker into `output_dir`.
///
/// Returns the path written. The file only appears once the image has been
/// fully encoded; an existing sticker with the same name is replaced.
pub fn render_sticker_to_dir(
    record: &AttendeeRecord,
    output_dir: &Path,
    fonts: &FontSet,
    config: &StickerConfig,
) -> Result<PathBuf, RenderError> {
    let sticker = render_sticker(record, fonts, config)?;
    let path = output_dir.join(record.sticker_file_name());
    write_png(&sticker, &path)?;
    Ok(path)
}

/// Renders every row of `roster` into `output_dir`, creating the directory
/// if needed.
///
/// # Errors
/// Only [`StickerPressError::OutputDir`] is returned; per-row failures are
/// collected in the report.
pub fn render_roster(
    roster: &Roster,
    output_dir: &Path,
    fonts: &FontSet,
    config: &StickerConfig,
) -> Result<RenderReport, StickerPressError> {
    fs::create_dir_all(output_dir).map_err(|source| StickerPressError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut report = RenderReport::new(&roster.source, output_dir, fonts.tier, roster.len());
    tracing::info!("Found {} attendees in the CSV file", roster.len());

    for (row_number, row) in roster.numbered_rows() {
        let record = match row.clone().into_record() {
            Ok(record) => record,
            Err(fields) => {
                tracing::warn!("Skipping row {} due to missing data", row_number);
                report.skipped.push(SkippedRow {
                    row: row_number,
                    name: format!("{} {}", row.first_name, row.last_name)
                        .trim()
                        .to_string(),
                    reason: SkipReason::MissingFields { fields },
                });
                continue;
            }
        };

        let first = record.display_first();
        let last = record.display_last();
        match render_sticker_to_dir(&record, output_dir, fonts, config) {
            Ok(path) => {
                let company = record.company.clone();
                match &company {
                    Some(company) => {
                        tracing::info!("Generated sticker for {} {} ({})", first, last, company)
                    }
                    None => tracing::info!("Generated sticker for {} {}", first, last),
                }
                report.rendered.push(RenderedSticker {
                    row: row_number,
                    first_name: first,
                    last_name: last,
                    company,
                    path,
                });
            }
            Err(err) => {
                tracing::warn!("Error creating sticker for {} {}: {}", first, last, err);
                report.skipped.push(SkippedRow {
                    row: row_number,
                    name: format!("{first} {last}"),
                    reason: err.into(),
                });
            }
        }
    }

    Ok(report)
}

/// Encodes `image` as PNG in memory, writes it to a hidden sibling file and
/// renames it into place.
fn write_png(image: &RgbImage, path: &Path) -> Result<(), RenderError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| RenderError::Encode { source })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp_path, &bytes).map_err(|source| RenderError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        RenderError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
