//! Attendee records read from the roster.

use serde::Serialize;
use std::fmt;

/// One data row of the roster CSV, exactly as read.
///
/// Columns that are absent from the header, or cells missing from a short
/// row, are read as empty strings. Nothing is trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
}

/// A required roster column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RequiredField {
    FirstName,
    LastName,
    Email,
}

impl RequiredField {
    /// The CSV header this field is read from.
    pub fn header(self) -> &'static str {
        match self {
            RequiredField::FirstName => "First Name",
            RequiredField::LastName => "Last Name",
            RequiredField::Email => "Email",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl RosterRow {
    /// Returns the required fields that are empty, in header order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.first_name.is_empty() {
            missing.push(RequiredField::FirstName);
        }
        if self.last_name.is_empty() {
            missing.push(RequiredField::LastName);
        }
        if self.email.is_empty() {
            missing.push(RequiredField::Email);
        }
        missing
    }

    /// Converts the row into an [`AttendeeRecord`] if every required field is
    /// present, or returns the list of missing fields.
    pub fn into_record(self) -> Result<AttendeeRecord, Vec<RequiredField>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(AttendeeRecord {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            company: if self.company.is_empty() {
                None
            } else {
                Some(self.company)
            },
        })
    }
}

/// A validated attendee: first name, last name and email are non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttendeeRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Only used in the contact payload, never displayed on the sticker.
    pub company: Option<String>,
}

impl AttendeeRecord {
    /// Creates a record without a company.
    ///
    /// Required fields are not checked here; use [`RosterRow::into_record`]
    /// for untrusted input.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            company: None,
        }
    }

    /// Sets the company (empty strings clear it).
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        let company = company.into();
        self.company = if company.is_empty() {
            None
        } else {
            Some(company)
        };
        self
    }

    /// First name as printed on the sticker.
    pub fn display_first(&self) -> String {
        self.first_name.to_uppercase()
    }

    /// Last name as printed on the sticker.
    pub fn display_last(&self) -> String {
        self.last_name.to_uppercase()
    }

    /// File name of this attendee's sticker image.
    ///
    /// Built from the uppercased names with spaces and slashes replaced by
    /// underscores, so identical names always map to the same file.
    pub fn sticker_file_name(&self) -> String {
        let stem = format!("{}_{}", self.display_first(), self.display_last())
            .replace(' ', "_")
            .replace('/', "_");
        format!("{stem}_sticker.png")
    }
}
