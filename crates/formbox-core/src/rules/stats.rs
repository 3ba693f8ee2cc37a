use crate::domain::contact::Contact;
use crate::dto::ContactStats;
use crate::time::month_key;
use chrono::{DateTime, Utc};

/// Full scan over `contacts`; nothing is maintained incrementally.
pub fn compute_stats(contacts: &[Contact], now: DateTime<Utc>) -> ContactStats {
    let mut stats = ContactStats {
        total: contacts.len(),
        ..Default::default()
    };

    for contact in contacts {
        if contact.is_recent_at(now) {
            stats.recent += 1;
        }
        *stats.by_reason.entry(contact.reason.clone()).or_insert(0) += 1;
        *stats
            .by_month
            .entry(month_key(contact.created_at))
            .or_insert(0) += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::compute_stats;
    use crate::domain::{Contact, ContactForm};
    use chrono::{Duration, Local, TimeZone, Utc};

    fn contact(reason: &str, created_at: chrono::DateTime<Utc>) -> Contact {
        Contact::new_at(
            ContactForm {
                reason: Some(reason.to_string()),
                ..Default::default()
            },
            created_at,
        )
    }

    #[test]
    fn groups_by_reason_and_month() {
        let now = Local
            .with_ymd_and_hms(2030, 3, 15, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let contacts = vec![
            contact("A", now),
            contact("A", now - Duration::days(30)),
            contact("B", now - Duration::days(2)),
        ];

        let stats = compute_stats(&contacts, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recent, 2);
        assert_eq!(stats.by_reason.get("A"), Some(&2));
        assert_eq!(stats.by_reason.get("B"), Some(&1));
        assert_eq!(stats.by_reason.len(), 2);
        assert_eq!(stats.by_month.get("2030-03"), Some(&2));
        assert_eq!(stats.by_month.get("2030-02"), Some(&1));
    }

    #[test]
    fn empty_collection_is_zeroed() {
        let stats = compute_stats(&[], Utc::now());
        assert_eq!(stats.total, 0);
        assert!(stats.by_reason.is_empty());
        assert!(stats.by_month.is_empty());
    }
}
