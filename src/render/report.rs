//! Render report types for tracking written stickers and skipped rows.
//!
//! Every roster row ends up either in [`RenderReport::rendered`] or in
//! [`RenderReport::skipped`]; nothing is dropped silently.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::font::FontTier;
use crate::roster::RequiredField;

/// The outcome of one renderer run.
#[derive(Clone, Debug, Serialize)]
pub struct RenderReport {
    /// The roster that was read.
    pub roster: PathBuf,
    /// Directory the stickers were written to.
    pub output_dir: PathBuf,
    /// Font provider used for the whole batch.
    pub font_tier: FontTier,
    /// Number of data rows in the roster.
    pub rows_read: usize,
    /// Stickers written, in roster order.
    pub rendered: Vec<RenderedSticker>,
    /// Rows that produced no sticker, in roster order.
    pub skipped: Vec<SkippedRow>,
}

impl RenderReport {
    /// Create an empty report for a run.
    pub fn new(
        roster: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        font_tier: FontTier,
        rows_read: usize,
    ) -> Self {
        Self {
            roster: roster.into(),
            output_dir: output_dir.into(),
            font_tier,
            rows_read,
            rendered: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Rows skipped for a specific kind of reason.
    pub fn skipped_for(&self, kind: SkipKind) -> impl Iterator<Item = &SkippedRow> {
        self.skipped.iter().filter(move |s| s.reason.kind() == kind)
    }
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} attendees in the CSV file", self.rows_read)?;
        writeln!(f, "Font: {}", self.font_tier)?;

        for sticker in &self.rendered {
            writeln!(f, "  {}", sticker)?;
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped ({}):", self.skipped.len())?;
            for skipped in &self.skipped {
                writeln!(f, "  - {}", skipped)?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "All stickers have been generated in the '{}' directory ({} written, {} skipped)",
            self.output_dir.display(),
            self.rendered.len(),
            self.skipped.len()
        )
    }
}

/// A sticker that was written to disk.
#[derive(Clone, Debug, Serialize)]
pub struct RenderedSticker {
    /// 1-based roster row.
    pub row: usize,
    /// Uppercased first name as printed.
    pub first_name: String,
    /// Uppercased last name as printed.
    pub last_name: String,
    /// Company carried in the QR payload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Where the image was written.
    pub path: PathBuf,
}

impl fmt::Display for RenderedSticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generated sticker for {} {}", self.first_name, self.last_name)?;
        if let Some(company) = &self.company {
            write!(f, " ({})", company)?;
        }
        Ok(())
    }
}

/// A roster row that produced no sticker.
#[derive(Clone, Debug, Serialize)]
pub struct SkippedRow {
    /// 1-based roster row.
    pub row: usize,
    /// Display name if one could be derived (empty otherwise).
    pub name: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.trim().is_empty() {
            write!(f, "row {}: {}", self.row, self.reason)
        } else {
            write!(f, "row {} ({}): {}", self.row, self.name, self.reason)
        }
    }
}

/// Why a row produced no sticker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// One or more required fields are empty.
    MissingFields { fields: Vec<RequiredField> },
    /// The contact payload does not fit in a QR code.
    QrEncoding { message: String },
    /// The sticker could not be encoded or written.
    ImageWrite { message: String },
}

/// Stable code for a [`SkipReason`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipKind {
    MissingFields,
    QrEncoding,
    ImageWrite,
}

impl SkipReason {
    pub fn kind(&self) -> SkipKind {
        match self {
            SkipReason::MissingFields { .. } => SkipKind::MissingFields,
            SkipReason::QrEncoding { .. } => SkipKind::QrEncoding,
            SkipReason::ImageWrite { .. } => SkipKind::ImageWrite,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFields { fields } => {
                let names: Vec<&str> = fields.iter().map(|field| field.header()).collect();
                write!(f, "missing data ({})", names.join(", "))
            }
            SkipReason::QrEncoding { message } => write!(f, "QR encoding failed: {}", message),
            SkipReason::ImageWrite { message } => write!(f, "could not write sticker: {}", message),
        }
    }
}
