use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use formbox_core::time::{format_datetime, parse_local_timestamp, parse_local_timestamp_end};
use formbox_core::{Contact, ContactId, ContactSummary};
use std::str::FromStr;

pub fn parse_contact_id(raw: &str) -> Result<ContactId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("contact id cannot be empty"));
    }
    ContactId::from_str(trimmed).map_err(|_| anyhow!("invalid contact id: {}", trimmed))
}

pub fn parse_range_start(raw: &str) -> Result<DateTime<Utc>> {
    Ok(parse_local_timestamp(raw)?)
}

pub fn parse_range_end(raw: &str) -> Result<DateTime<Utc>> {
    Ok(parse_local_timestamp_end(raw)?)
}

pub fn contact_line(contact: &Contact) -> String {
    summary_line(&contact.summary())
}

pub fn summary_line(summary: &ContactSummary) -> String {
    format!(
        "{}  {}  {} <{}>  [{}]",
        summary.id,
        format_datetime(summary.created_at),
        summary.name,
        summary.email,
        summary.reason
    )
}

#[cfg(test)]
mod tests {
    use super::{contact_line, parse_contact_id, parse_range_end, parse_range_start, summary_line};
    use formbox_core::{Contact, ContactForm};

    #[test]
    fn parse_contact_id_rejects_garbage() {
        assert!(parse_contact_id("").is_err());
        assert!(parse_contact_id("abc").is_err());
        assert_eq!(parse_contact_id(" 42 ").unwrap().as_i64(), 42);
    }

    #[test]
    fn range_end_is_after_start_for_same_day() {
        let start = parse_range_start("2030-01-15").unwrap();
        let end = parse_range_end("2030-01-15").unwrap();
        assert!(end > start);
    }

    #[test]
    fn contact_and_summary_lines_agree() {
        let contact = Contact::new(ContactForm {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            reason: Some("consulting".to_string()),
            ..Default::default()
        });
        let line = contact_line(&contact);
        assert_eq!(line, summary_line(&contact.summary()));
        assert!(line.ends_with("Ada <ada@example.com>  [consulting]"), "{line}");
    }
}
