//! Fuzz target for contact payload encoding.
//!
//! Splits the input into name and email fields and runs the payload through
//! the QR generator; oversized payloads must come back as errors.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stickerpress::config::StickerConfig;
use stickerpress::render::{generate_qr, ContactPayload};
use stickerpress::roster::AttendeeRecord;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8 * 1024 {
        return;
    }

    let text = String::from_utf8_lossy(data);
    let mut fields = text.splitn(3, '\n');
    let first = fields.next().unwrap_or_default();
    let last = fields.next().unwrap_or_default();
    let email = fields.next().unwrap_or_default();

    let record = AttendeeRecord::new(first, last, email);
    let payload = ContactPayload::from_record(&record);
    let _ = generate_qr(&payload, &StickerConfig::default());
});
