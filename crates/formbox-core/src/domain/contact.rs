use crate::domain::ids::ContactId;
use crate::dto::ContactSummary;
use crate::error::CoreError;
use crate::rules::recency;
use crate::rules::validation::{validate_contact, ContactIssue};
use crate::time::{self, iso_millis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw values collected from the contact form. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub accepts_terms: Option<bool>,
    pub contact_preference: Option<String>,
}

/// One submitted contact request.
///
/// The serialized names are the storage and export format; deserializing
/// trusts the input and never regenerates the id or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "motivo", default)]
    pub reason: String,
    #[serde(rename = "mensaje", default)]
    pub message: String,
    #[serde(rename = "aceptaTerminos", default)]
    pub accepts_terms: bool,
    #[serde(rename = "preferenciaContacto", default)]
    pub contact_preference: String,
    #[serde(rename = "fechaCreacion", with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fechaActualizacion", with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(form: ContactForm) -> Self {
        Self::new_at(form, time::now_utc())
    }

    /// Builds an unvalidated contact with a fresh id; text fields are trimmed.
    pub fn new_at(form: ContactForm, now: DateTime<Utc>) -> Self {
        Self {
            id: ContactId::generate(),
            name: trimmed(form.name),
            email: trimmed(form.email),
            phone: trimmed(form.phone),
            reason: trimmed(form.reason),
            message: trimmed(form.message),
            accepts_terms: form.accepts_terms.unwrap_or(false),
            contact_preference: trimmed(form.contact_preference),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.touch_at(time::now_utc());
    }

    pub fn touch_at(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn validate(&self) -> Vec<ContactIssue> {
        validate_contact(self)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn validation_messages(&self) -> Vec<String> {
        self.validate().iter().map(ToString::to_string).collect()
    }

    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidContact(issues))
        }
    }

    pub fn is_recent(&self) -> bool {
        self.is_recent_at(time::now_utc())
    }

    pub fn is_recent_at(&self, now: DateTime<Utc>) -> bool {
        recency::is_recent(self.created_at, now)
    }

    pub fn days_elapsed(&self) -> i64 {
        self.days_elapsed_at(time::now_utc())
    }

    pub fn days_elapsed_at(&self, now: DateTime<Utc>) -> i64 {
        recency::days_elapsed(self.created_at, now)
    }

    pub fn summary(&self) -> ContactSummary {
        ContactSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            reason: self.reason.clone(),
            created_at: self.created_at,
        }
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|raw| raw.trim().to_string()).unwrap_or_default()
}
