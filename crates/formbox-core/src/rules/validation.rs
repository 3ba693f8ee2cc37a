use crate::domain::contact::Contact;
use crate::domain::email::is_valid_email;
use serde::Serialize;
use thiserror::Error;

pub const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactIssue {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("email is not a valid address")]
    InvalidEmail,
    #[error("phone is required")]
    MissingPhone,
    #[error("reason for contact is required")]
    MissingReason,
    #[error("message is required")]
    MissingMessage,
    #[error("message must be at least 10 characters")]
    MessageTooShort,
    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,
    #[error("contact preference is required")]
    MissingPreference,
}

/// Every violated rule, in form order. An empty list means the contact may
/// be persisted.
pub fn validate_contact(contact: &Contact) -> Vec<ContactIssue> {
    let mut issues = Vec::new();

    if contact.name.trim().is_empty() {
        issues.push(ContactIssue::MissingName);
    }

    let email = contact.email.trim();
    if email.is_empty() {
        issues.push(ContactIssue::MissingEmail);
    } else if !is_valid_email(&contact.email) {
        issues.push(ContactIssue::InvalidEmail);
    }

    if contact.phone.trim().is_empty() {
        issues.push(ContactIssue::MissingPhone);
    }

    if contact.reason.trim().is_empty() {
        issues.push(ContactIssue::MissingReason);
    }

    let message = contact.message.trim();
    if message.is_empty() {
        issues.push(ContactIssue::MissingMessage);
    } else if message.chars().count() < MIN_MESSAGE_CHARS {
        issues.push(ContactIssue::MessageTooShort);
    }

    if !contact.accepts_terms {
        issues.push(ContactIssue::TermsNotAccepted);
    }

    if contact.contact_preference.trim().is_empty() {
        issues.push(ContactIssue::MissingPreference);
    }

    issues
}
