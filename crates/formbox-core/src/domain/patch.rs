use crate::domain::contact::Contact;

/// Field-by-field edit of a stored contact. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub accepts_terms: Option<bool>,
    pub contact_preference: Option<String>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.reason.is_none()
            && self.message.is_none()
            && self.accepts_terms.is_none()
            && self.contact_preference.is_none()
    }

    /// Writes the present fields into `contact`. Timestamps are left alone;
    /// the repository touches the contact when it stores the update.
    pub fn apply_to(&self, contact: &mut Contact) {
        apply_text(&self.name, &mut contact.name);
        apply_text(&self.email, &mut contact.email);
        apply_text(&self.phone, &mut contact.phone);
        apply_text(&self.reason, &mut contact.reason);
        apply_text(&self.message, &mut contact.message);
        if let Some(accepts) = self.accepts_terms {
            contact.accepts_terms = accepts;
        }
        apply_text(&self.contact_preference, &mut contact.contact_preference);
    }
}

fn apply_text(value: &Option<String>, target: &mut String) {
    if let Some(value) = value {
        *target = value.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::ContactPatch;
    use crate::domain::{Contact, ContactForm};

    #[test]
    fn apply_only_touches_present_fields() {
        let mut contact = Contact::new(ContactForm {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            reason: Some("consulting".to_string()),
            ..Default::default()
        });
        let before = contact.clone();

        let patch = ContactPatch {
            email: Some("  ada@lovelace.dev ".to_string()),
            accepts_terms: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut contact);

        assert_eq!(contact.email, "ada@lovelace.dev");
        assert!(contact.accepts_terms);
        assert_eq!(contact.name, before.name);
        assert_eq!(contact.reason, before.reason);
        assert_eq!(contact.id, before.id);
        assert_eq!(contact.updated_at, before.updated_at);
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(ContactPatch::default().is_empty());
    }
}
