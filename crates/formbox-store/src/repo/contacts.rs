use crate::backend::KeyValueStore;
use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use formbox_core::rules::compute_stats;
use formbox_core::time::now_utc;
use formbox_core::{Contact, ContactId, ContactStats};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, warn};

const PROBE_KEY: &str = "__formbox_storage_probe__";

/// Contact collection stored as one JSON array under a single key. Every
/// write reads the full collection, modifies it and writes it back.
pub struct ContactsRepo<'a, S: KeyValueStore + ?Sized> {
    storage: &'a S,
    key: &'a str,
}

impl<'a, S: KeyValueStore + ?Sized> ContactsRepo<'a, S> {
    pub fn new(storage: &'a S, key: &'a str) -> Self {
        Self { storage, key }
    }

    /// Absent key reads as empty. So does a value that is not a JSON array;
    /// the next write replaces it. Array elements that fail to decode are
    /// skipped one by one.
    pub fn get_all(&self) -> Result<Vec<Contact>> {
        let Some(raw) = self.storage.get(self.key)? else {
            return Ok(Vec::new());
        };
        let records = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(key = self.key, error = %err, "stored contacts unreadable, treating as empty");
                return Ok(Vec::new());
            }
        };

        let mut contacts = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Contact>(record) {
                Ok(contact) => contacts.push(contact),
                Err(err) => {
                    warn!(key = self.key, index, error = %err, "skipping undecodable stored contact")
                }
            }
        }
        Ok(contacts)
    }

    pub fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        Ok(self
            .get_all()?
            .into_iter()
            .find(|contact| contact.id == id))
    }

    pub fn add(&self, contact: &Contact) -> Result<()> {
        contact.ensure_valid()?;

        let mut contacts = self.get_all()?;
        if contacts.iter().any(|existing| existing.email == contact.email) {
            return Err(StoreError::DuplicateEmail(contact.email.clone()));
        }
        if contacts.iter().any(|existing| existing.id == contact.id) {
            return Err(StoreError::DuplicateId(contact.id));
        }

        contacts.push(contact.clone());
        self.save_all(&contacts)
    }

    /// Replaces the stored contact with the same id and refreshes its
    /// `updated_at`.
    pub fn update(&self, contact: &mut Contact) -> Result<()> {
        self.update_at(now_utc(), contact)
    }

    pub fn update_at(&self, now: DateTime<Utc>, contact: &mut Contact) -> Result<()> {
        let mut contacts = self.get_all()?;
        let index = contacts
            .iter()
            .position(|existing| existing.id == contact.id)
            .ok_or(StoreError::NotFound(contact.id))?;

        contact.ensure_valid()?;
        contact.touch_at(now);
        contacts[index] = contact.clone();
        self.save_all(&contacts)
    }

    pub fn remove(&self, id: ContactId) -> Result<()> {
        let contacts = self.get_all()?;
        let before = contacts.len();
        let remaining: Vec<Contact> = contacts
            .into_iter()
            .filter(|contact| contact.id != id)
            .collect();
        if remaining.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.save_all(&remaining)
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove(self.key)
    }

    /// Case-insensitive substring match on name, email, reason and message.
    pub fn search(&self, term: &str) -> Result<Vec<Contact>> {
        let needle = term.to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|contact| {
                [
                    &contact.name,
                    &contact.email,
                    &contact.reason,
                    &contact.message,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Contacts created within `[start, end]`.
    pub fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Contact>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|contact| contact.created_at >= start && contact.created_at <= end)
            .collect())
    }

    pub fn get_stats(&self) -> Result<ContactStats> {
        self.get_stats_at(now_utc())
    }

    pub fn get_stats_at(&self, now: DateTime<Utc>) -> Result<ContactStats> {
        Ok(compute_stats(&self.get_all()?, now))
    }

    pub fn export_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.get_all()?)?)
    }

    /// Replaces the stored collection with the valid records of `json`.
    ///
    /// The input must be a JSON array. Records that do not decode or do not
    /// validate are dropped one by one, as are later records repeating an
    /// earlier id. Emails are not de-duplicated.
    /// Returns how many records were stored.
    pub fn import_from_json(&self, json: &str) -> Result<usize> {
        let records: Vec<Value> =
            serde_json::from_str(json).map_err(|err| StoreError::ImportParse(err.to_string()))?;
        let total = records.len();

        let mut valid = Vec::with_capacity(total);
        let mut seen = HashSet::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Contact>(record) {
                Ok(contact) => {
                    let issues = contact.validate();
                    if !issues.is_empty() {
                        debug!(index, id = %contact.id, ?issues, "skipping invalid contact");
                    } else if !seen.insert(contact.id) {
                        warn!(index, id = %contact.id, "skipping contact with duplicate id");
                    } else {
                        valid.push(contact);
                    }
                }
                Err(err) => debug!(index, error = %err, "skipping undecodable contact"),
            }
        }

        if valid.len() != total {
            warn!(
                imported = valid.len(),
                skipped = total - valid.len(),
                "some contacts could not be imported because their data is invalid or repeated"
            );
        }

        self.save_all(&valid)?;
        Ok(valid.len())
    }

    pub fn is_storage_available(&self) -> bool {
        let probe = self
            .storage
            .set(PROBE_KEY, PROBE_KEY)
            .and_then(|()| self.storage.remove(PROBE_KEY));
        if let Err(err) = &probe {
            debug!(error = %err, "storage probe failed");
        }
        probe.is_ok()
    }

    /// Byte length of the stored collection, 0 when nothing is stored.
    pub fn get_storage_size(&self) -> Result<usize> {
        Ok(self
            .storage
            .get(self.key)?
            .map(|raw| raw.len())
            .unwrap_or(0))
    }

    fn save_all(&self, contacts: &[Contact]) -> Result<()> {
        let json = serde_json::to_string(contacts)?;
        self.storage.set(self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::{KeyValueStore, MemoryStorage};
    use crate::error::{Result, StoreError};
    use crate::Store;
    use formbox_core::{Contact, ContactForm};

    struct ReadOnlyStorage;

    impl KeyValueStore for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn valid_contact(email: &str) -> Contact {
        Contact::new(ContactForm {
            name: Some("Ada".to_string()),
            email: Some(email.to_string()),
            phone: Some("555-0100".to_string()),
            reason: Some("consulting".to_string()),
            message: Some("Hello there, let us talk.".to_string()),
            accepts_terms: Some(true),
            contact_preference: Some("email".to_string()),
        })
    }

    #[test]
    fn probe_reports_unavailable_backend() {
        let store = Store::with_backend(ReadOnlyStorage, "contacts");
        assert!(!store.contacts().is_storage_available());

        let err = store
            .contacts()
            .add(&valid_contact("ada@example.com"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn probe_leaves_no_trace() {
        let store = Store::open_in_memory();
        assert!(store.contacts().is_storage_available());
        assert_eq!(store.backend().get(super::PROBE_KEY).unwrap(), None);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let store = Store::with_backend(MemoryStorage::new(), "contacts");
        let first = valid_contact("ada@example.com");
        store.contacts().add(&first).expect("add");

        let mut clone = valid_contact("grace@example.com");
        clone.id = first.id;
        let err = store.contacts().add(&clone).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == first.id));
    }
}
