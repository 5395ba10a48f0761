//! Fuzz target for roster CSV parsing.
//!
//! Feeds arbitrary bytes to the roster reader and converts every row into an
//! attendee record, checking for panics in header matching and ragged rows.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stickerpress::roster::io_csv::{from_roster_csv_slice, fuzz_parse_roster};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_parse_roster(data);
    if let Ok(roster) = from_roster_csv_slice(data) {
        for (_, row) in roster.numbered_rows() {
            if let Ok(record) = row.clone().into_record() {
                let _ = record.sticker_file_name();
            }
        }
    }
});
