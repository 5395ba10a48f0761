use proptest::prelude::*;
use stickerpress::render::ContactPayload;
use stickerpress::roster::AttendeeRecord;

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z][a-z' -]{0,15}"
}

fn email() -> impl Strategy<Value = String> {
    "[a-z0-9.]{1,12}@[a-z]{1,10}\\.[a-z]{2,3}"
}

fn company() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[A-Za-z][A-Za-z &]{0,20}"]
}

proptest! {
    #[test]
    fn payload_has_one_email_and_org_iff_company(
        first in name(),
        last in name(),
        email in email(),
        company in company(),
    ) {
        let record = AttendeeRecord::new(first.clone(), last.clone(), email.clone())
            .with_company(company.clone());
        let payload = ContactPayload::from_record(&record);
        let lines: Vec<&str> = payload.as_str().lines().collect();

        prop_assert_eq!(lines.first().copied(), Some("BEGIN:VCARD"));
        prop_assert_eq!(lines.last().copied(), Some("END:VCARD"));
        prop_assert_eq!(lines.iter().filter(|l| l.starts_with("EMAIL:")).count(), 1);
        prop_assert_eq!(
            lines.iter().any(|l| l.starts_with("ORG:")),
            !company.is_empty()
        );

        let expected_fn = format!("FN:{first} {last}");
        let expected_n = format!("N:{last};{first};;;");
        prop_assert!(lines.contains(&expected_fn.as_str()));
        prop_assert!(lines.contains(&expected_n.as_str()));
    }

    #[test]
    fn display_text_is_uppercase_but_payload_keeps_case(
        first in name(),
        last in name(),
        email in email(),
    ) {
        let record = AttendeeRecord::new(first.clone(), last.clone(), email);
        prop_assert_eq!(record.display_first(), first.to_uppercase());
        prop_assert_eq!(record.display_last(), last.to_uppercase());

        let payload = ContactPayload::from_record(&record);
        let expected_fn = format!("FN:{first} {last}");
        prop_assert!(payload.as_str().contains(&expected_fn));
    }

    #[test]
    fn sticker_file_name_has_no_separators(first in name(), last in name(), email in email()) {
        let record = AttendeeRecord::new(first, last, email);
        let file_name = record.sticker_file_name();
        prop_assert!(!file_name.contains(' '));
        prop_assert!(!file_name.contains('/'));
        prop_assert!(file_name.ends_with("_sticker.png"));
    }
}
