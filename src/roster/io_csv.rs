//! Roster CSV reader.
//!
//! # Format
//!
//! ```text
//! First Name,Last Name,Email,Company
//! Ada,Lovelace,ada@example.org,Analytical Engines
//! Grace,Hopper,grace@example.org,
//! ```
//!
//! Columns are matched by header name, so their order does not matter and
//! extra columns are ignored. Rows may be shorter than the header; missing
//! cells read as empty. Any CSV syntax or encoding error is fatal for the
//! whole roster, while empty required fields are left for the renderer to
//! skip row by row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use super::{Roster, RosterRow};
use crate::error::StickerPressError;

// ============================================================================
// Roster CSV Schema Type (internal to this module)
// ============================================================================

/// A single row as the CSV deserializer sees it.
///
/// Every column is optional so that absent columns, empty cells and cells
/// missing from short rows all come through as `None`.
#[derive(Debug, Deserialize)]
struct RawRosterRow {
    #[serde(rename = "First Name", default)]
    first_name: Option<String>,
    #[serde(rename = "Last Name", default)]
    last_name: Option<String>,
    #[serde(rename = "Email", default)]
    email: Option<String>,
    #[serde(rename = "Company", default)]
    company: Option<String>,
}

impl From<RawRosterRow> for RosterRow {
    fn from(raw: RawRosterRow) -> Self {
        Self {
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            company: raw.company.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Reads a roster from a CSV file.
///
/// # Errors
/// Returns [`StickerPressError::RosterNotFound`] if `path` is not an existing
/// file, [`StickerPressError::RosterParse`] if the CSV cannot be read, and
/// [`StickerPressError::EmptyRoster`] if it has no data rows.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use stickerpress::roster::io_csv::read_roster_csv;
///
/// let roster = read_roster_csv(Path::new("data.csv"))?;
/// println!("{} attendees", roster.len());
/// # Ok::<(), stickerpress::StickerPressError>(())
/// ```
pub fn read_roster_csv(path: &Path) -> Result<Roster, StickerPressError> {
    if !path.is_file() {
        return Err(StickerPressError::RosterNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(StickerPressError::Io)?;
    let rows = parse_rows(BufReader::new(file), path)?;

    if rows.is_empty() {
        return Err(StickerPressError::EmptyRoster {
            path: path.to_path_buf(),
        });
    }

    Ok(Roster {
        source: path.to_path_buf(),
        rows,
    })
}

/// Reads a roster from a CSV string.
///
/// Useful for testing without file I/O. An empty roster is not an error
/// here; only [`read_roster_csv`] enforces at least one data row.
pub fn from_roster_csv_str(csv_str: &str) -> Result<Roster, StickerPressError> {
    from_roster_csv_slice(csv_str.as_bytes())
}

/// Reads a roster from CSV bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_roster_csv_slice(bytes: &[u8]) -> Result<Roster, StickerPressError> {
    let dummy_path = Path::new("<bytes>");
    let rows = parse_rows(bytes, dummy_path)?;

    Ok(Roster {
        source: dummy_path.to_path_buf(),
        rows,
    })
}

fn parse_rows<R: Read>(reader: R, path: &Path) -> Result<Vec<RosterRow>, StickerPressError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let raw: RawRosterRow = result.map_err(|source| StickerPressError::RosterParse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(RosterRow::from(raw));
    }

    Ok(rows)
}

/// Parses raw bytes as a roster without touching the filesystem.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_roster(bytes: &[u8]) -> Result<(), StickerPressError> {
    from_roster_csv_slice(bytes).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RequiredField;

    fn sample_roster_csv() -> &'static str {
        "First Name,Last Name,Email,Company\n\
         Ada,Lovelace,ada@example.org,Analytical Engines\n\
         Grace,Hopper,grace@example.org,\n\
         Alan,Turing,,Bletchley Park\n"
    }

    #[test]
    fn test_reads_rows_in_file_order() {
        let roster = from_roster_csv_str(sample_roster_csv()).expect("parse failed");

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.rows[0].first_name, "Ada");
        assert_eq!(roster.rows[0].company, "Analytical Engines");
        assert_eq!(roster.rows[1].company, "");
        assert_eq!(roster.rows[2].missing_fields(), vec![RequiredField::Email]);

        let positions: Vec<usize> = roster.numbered_rows().map(|(n, _)| n).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_column_order_and_extra_columns_are_ignored() {
        let csv = "Email,Badge Color,Last Name,First Name\n\
                   ada@example.org,red,Lovelace,Ada\n";
        let roster = from_roster_csv_str(csv).expect("parse failed");

        assert_eq!(roster.rows[0].first_name, "Ada");
        assert_eq!(roster.rows[0].last_name, "Lovelace");
        assert_eq!(roster.rows[0].email, "ada@example.org");
        assert_eq!(roster.rows[0].company, "");
    }

    #[test]
    fn test_missing_company_column_reads_as_empty() {
        let csv = "First Name,Last Name,Email\nAda,Lovelace,ada@example.org\n";
        let roster = from_roster_csv_str(csv).expect("parse failed");
        assert_eq!(roster.rows[0].company, "");
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let csv = "First Name,Last Name,Email,Company\nAda,Lovelace\n";
        let roster = from_roster_csv_str(csv).expect("parse failed");

        assert_eq!(roster.rows[0].last_name, "Lovelace");
        assert_eq!(roster.rows[0].email, "");
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let csv = "First Name,Last Name,Email,Company\n\
                   Ada,Lovelace,ada@example.org,\"Engines, Ltd.\"\n";
        let roster = from_roster_csv_str(csv).expect("parse failed");
        assert_eq!(roster.rows[0].company, "Engines, Ltd.");
    }

    #[test]
    fn test_header_only_is_empty_roster_in_memory() {
        let roster = from_roster_csv_str("First Name,Last Name,Email\n").expect("parse failed");
        assert!(roster.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let bytes = b"First Name,Last Name,Email\n\xff\xfe,Lovelace,a@b.c\n";
        let result = from_roster_csv_slice(bytes);
        assert!(matches!(
            result,
            Err(StickerPressError::RosterParse { .. })
        ));
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let result = read_roster_csv(Path::new("definitely/not/here.csv"));
        assert!(matches!(
            result,
            Err(StickerPressError::RosterNotFound { .. })
        ));
    }

    #[test]
    fn test_read_header_only_file_is_empty_roster() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "First Name,Last Name,Email\n").expect("write csv");

        let result = read_roster_csv(&path);
        assert!(matches!(result, Err(StickerPressError::EmptyRoster { .. })));
    }
}
