//! Attendee roster input.
//!
//! The roster is a CSV file with a header row naming at least `First Name`,
//! `Last Name` and `Email`; `Company` is optional. Rows are kept in file
//! order together with their 1-based position so skipped rows can be
//! reported the way a person counts them.

pub mod io_csv;
mod model;

pub use model::{AttendeeRecord, RequiredField, RosterRow};

use std::path::PathBuf;

/// A roster as read from disk.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    /// Where the roster was read from (`<bytes>` for in-memory input).
    pub source: PathBuf,
    /// Data rows in file order.
    pub rows: Vec<RosterRow>,
}

impl Roster {
    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows together with their 1-based position.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &RosterRow)> {
        self.rows.iter().enumerate().map(|(i, row)| (i + 1, row))
    }
}
