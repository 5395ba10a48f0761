use std::path::PathBuf;
use thiserror::Error;

/// The main error type for stickerpress operations.
///
/// Every variant here aborts the whole run. Per-record problems during
/// sticker rendering are reported through [`crate::render::SkipReason`]
/// instead and never surface as a `StickerPressError`.
#[derive(Debug, Error)]
pub enum StickerPressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Roster file '{path}' not found")]
    RosterNotFound { path: PathBuf },

    #[error("Failed to read roster CSV from {path}: {source}")]
    RosterParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Roster file '{path}' contains no data rows")]
    EmptyRoster { path: PathBuf },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sticker directory {path} does not exist or is not a directory")]
    StickerDirMissing { path: PathBuf },

    #[error("Failed to read sticker directory {path}: {source}")]
    StickerDirRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write PDF to {path}: {source}")]
    PdfWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write preview to {path}: {source}")]
    PreviewWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}
