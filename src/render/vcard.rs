//! vCard 3.0 contact payload embedded in each sticker's QR code.
//!
//! Field values are written verbatim. Semicolons, commas and newlines inside
//! names or emails are not escaped, so such values can confuse strict vCard
//! readers; rosters are expected to hold plain names.

use std::fmt;

use crate::roster::AttendeeRecord;

/// The text encoded into a sticker's QR code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactPayload(String);

impl ContactPayload {
    /// Builds the payload for an attendee.
    ///
    /// Lines, in order: `BEGIN:VCARD`, `VERSION:3.0`, `N:last;first;;;`,
    /// `FN:first last`, `EMAIL:email`, `ORG:company` (only when a company is
    /// set), `END:VCARD`, joined with `\n`. Names keep their original case.
    pub fn from_record(record: &AttendeeRecord) -> Self {
        let mut lines = vec![
            "BEGIN:VCARD".to_string(),
            "VERSION:3.0".to_string(),
            format!("N:{};{};;;", record.last_name, record.first_name),
            format!("FN:{} {}", record.first_name, record.last_name),
            format!("EMAIL:{}", record.email),
        ];

        if let Some(company) = record.company.as_deref().filter(|c| !c.is_empty()) {
            lines.push(format!("ORG:{company}"));
        }

        lines.push("END:VCARD".to_string());
        Self(lines.join("\n"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Payload size in bytes, as seen by the QR encoder.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContactPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
