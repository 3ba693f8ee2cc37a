use crate::error::{FacadeError, Result};
use chrono::{DateTime, Utc};
use formbox_core::time::{format_date, now_utc};
use formbox_core::{
    Contact, ContactForm, ContactId, ContactPatch, ContactStats, ContactSummary, SystemStatus,
    ValidationReport,
};
use formbox_store::repo::ContactsRepo;
use formbox_store::{FileStorage, KeyValueStore, Store};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, warn};

/// Serialized collection plus the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactExport {
    pub file_name: String,
    pub json: String,
}

/// The one entry point UI code talks to. Owns the store; every failure comes
/// back as a typed [`FacadeError`] after being logged.
pub struct ContactFacade<S: KeyValueStore = FileStorage> {
    store: Store<S>,
}

impl<S: KeyValueStore> ContactFacade<S> {
    pub fn new(store: Store<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    fn repo(&self) -> ContactsRepo<'_, S> {
        self.store.contacts()
    }

    pub fn save(&self, form: ContactForm) -> Result<Contact> {
        let contact = Contact::new(form);
        self.repo()
            .add(&contact)
            .map_err(|err| failed("save", err))?;
        info!(
            id = %contact.id,
            name = %contact.name,
            email = %contact.email,
            reason = %contact.reason,
            "contact saved"
        );
        Ok(contact)
    }

    /// Stored contacts in insertion order.
    pub fn list(&self) -> Result<Vec<Contact>> {
        let contacts = self.repo().get_all().map_err(|err| failed("list", err))?;
        debug!(count = contacts.len(), "contacts listed");
        Ok(contacts)
    }

    pub fn remove(&self, id: ContactId) -> Result<()> {
        self.repo().remove(id).map_err(|err| failed("remove", err))?;
        info!(%id, "contact removed");
        Ok(())
    }

    pub fn clear_all(&self) -> Result<()> {
        self.repo().clear().map_err(|err| failed("clear_all", err))?;
        info!("all contacts removed");
        Ok(())
    }

    pub fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> Result<Contact> {
        if patch.is_empty() {
            return Err(failed(
                "update_contact",
                FacadeError::Validation(vec!["no fields to update".to_string()]),
            ));
        }

        let repo = self.repo();
        let mut contact = repo
            .get_by_id(id)
            .map_err(|err| failed("update_contact", err))?
            .ok_or_else(|| failed("update_contact", FacadeError::NotFound(id)))?;
        patch.apply_to(&mut contact);
        repo.update(&mut contact)
            .map_err(|err| failed("update_contact", err))?;
        info!(%id, "contact updated");
        Ok(contact)
    }

    pub fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        let contact = self
            .repo()
            .get_by_id(id)
            .map_err(|err| failed("get_by_id", err))?;
        match &contact {
            Some(found) => debug!(%id, name = %found.name, "contact found"),
            None => debug!(%id, "contact not found"),
        }
        Ok(contact)
    }

    pub fn search(&self, term: &str) -> Result<Vec<Contact>> {
        let results = self
            .repo()
            .search(term)
            .map_err(|err| failed("search", err))?;
        debug!(term, count = results.len(), "contacts searched");
        Ok(results)
    }

    pub fn stats(&self) -> Result<ContactStats> {
        let stats = self.repo().get_stats().map_err(|err| failed("stats", err))?;
        debug!(total = stats.total, recent = stats.recent, "contact stats computed");
        Ok(stats)
    }

    pub fn recent(&self) -> Result<Vec<Contact>> {
        let now = now_utc();
        let recent: Vec<Contact> = self
            .list()?
            .into_iter()
            .filter(|contact| contact.is_recent_at(now))
            .collect();
        debug!(count = recent.len(), "recent contacts selected");
        Ok(recent)
    }

    pub fn by_reason(&self, reason: &str) -> Result<Vec<Contact>> {
        let matching: Vec<Contact> = self
            .list()?
            .into_iter()
            .filter(|contact| contact.reason == reason)
            .collect();
        debug!(reason, count = matching.len(), "contacts selected by reason");
        Ok(matching)
    }

    pub fn by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Contact>> {
        self.repo()
            .get_by_date_range(start, end)
            .map_err(|err| failed("by_date_range", err))
    }

    pub fn summaries(&self) -> Result<Vec<ContactSummary>> {
        Ok(self.list()?.iter().map(Contact::summary).collect())
    }

    pub fn export_contacts(&self) -> Result<ContactExport> {
        let json = self
            .repo()
            .export_to_json()
            .map_err(|err| failed("export_contacts", err))?;
        Ok(ContactExport {
            file_name: format!("contacts_{}.json", format_date(now_utc())),
            json,
        })
    }

    /// Writes the export file into `dir`, creating it when missing.
    pub fn write_export(&self, dir: &Path) -> Result<PathBuf> {
        let export = self.export_contacts()?;
        let path = dir.join(&export.file_name);
        fs::create_dir_all(dir)
            .and_then(|()| fs::write(&path, &export.json))
            .map_err(|err| failed("write_export", err))?;
        info!(path = %path.display(), "contacts exported");
        Ok(path)
    }

    /// Reads an exported file and replaces the stored collection with its
    /// valid records. Suspends only while the file is read.
    pub async fn import_contacts(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| failed("import_contacts", err))?;
        debug!(path = %path.display(), bytes = text.len(), "import file read");
        self.import_text(&text)
    }

    pub async fn import_contacts_from_reader<R>(&self, mut reader: R) -> Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .await
            .map_err(|err| failed("import_contacts", err))?;
        self.import_text(&text)
    }

    fn import_text(&self, text: &str) -> Result<usize> {
        let count = self
            .repo()
            .import_from_json(text)
            .map_err(|err| failed("import_contacts", err))?;
        info!(count, "contacts imported");
        Ok(count)
    }

    /// Dry run of [`save`](Self::save)'s validation; nothing is stored.
    pub fn validate_contact_data(&self, form: &ContactForm) -> ValidationReport {
        let report = ValidationReport::from_errors(Contact::new(form.clone()).validation_messages());
        if !report.valid {
            debug!(errors = ?report.errors, "contact data invalid");
        }
        report
    }

    /// Diagnostic snapshot. Each probe that fails is logged and reported as
    /// zero instead of failing the whole call.
    pub fn system_status(&self) -> SystemStatus {
        let repo = self.repo();
        let status = SystemStatus {
            storage_available: repo.is_storage_available(),
            total_contacts: degrade("system_status", repo.get_all().map(|all| all.len())),
            storage_size_bytes: degrade("system_status", repo.get_storage_size()),
            stats: degrade("system_status", repo.get_stats()),
        };
        debug!(
            storage_available = status.storage_available,
            total = status.total_contacts,
            bytes = status.storage_size_bytes,
            "system status collected"
        );
        status
    }
}

fn failed(op: &'static str, err: impl Into<FacadeError>) -> FacadeError {
    let err = err.into();
    warn!(op, kind = ?err.kind(), error = %err, "contact operation failed");
    err
}

fn degrade<T: Default>(op: &'static str, result: formbox_store::Result<T>) -> T {
    result.unwrap_or_else(|err| {
        warn!(op, error = %err, "falling back to default");
        T::default()
    })
}
