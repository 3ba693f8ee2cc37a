use chrono::{Duration, TimeZone, Utc};
use formbox_core::{Contact, ContactForm, ContactId, ContactIssue, CoreError};
use formbox_store::{Store, StoreError, StoreErrorKind};

fn form(name: &str, email: &str, reason: &str) -> ContactForm {
    ContactForm {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        phone: Some("555-0100".to_string()),
        reason: Some(reason.to_string()),
        message: Some("I would like to get in touch.".to_string()),
        accepts_terms: Some(true),
        contact_preference: Some("email".to_string()),
    }
}

#[test]
fn contact_add_get_remove_roundtrip() {
    let store = Store::open_in_memory();
    let contact = Contact::new(form("Ada Lovelace", "ada@example.com", "consulting"));
    store.contacts().add(&contact).expect("add contact");

    let fetched = store
        .contacts()
        .get_by_id(contact.id)
        .expect("get contact")
        .expect("contact exists");
    assert_eq!(fetched, contact);

    store.contacts().remove(contact.id).expect("remove contact");
    let missing = store.contacts().get_by_id(contact.id).expect("get contact");
    assert!(missing.is_none());
    assert!(store.contacts().get_all().expect("list").is_empty());
}

#[test]
fn add_rejects_invalid_contact() {
    let store = Store::open_in_memory();
    let contact = Contact::new(ContactForm {
        email: None,
        ..form("Ada", "ada@example.com", "consulting")
    });

    let err = store.contacts().add(&contact).unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);
    assert!(matches!(
        err,
        StoreError::Core(CoreError::InvalidContact(ref issues)) if issues == &vec![ContactIssue::MissingEmail]
    ));
    assert!(store.contacts().get_all().expect("list").is_empty());
}

#[test]
fn add_rejects_duplicate_email_case_sensitively() {
    let store = Store::open_in_memory();
    store
        .contacts()
        .add(&Contact::new(form("Ada", "ada@example.com", "a")))
        .expect("first add");

    let err = store
        .contacts()
        .add(&Contact::new(form("Ada Again", "ada@example.com", "b")))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail(ref email) if email == "ada@example.com"));
    assert_eq!(store.contacts().get_all().expect("list").len(), 1);

    store
        .contacts()
        .add(&Contact::new(form("Ada Upper", "Ada@example.com", "c")))
        .expect("different case is a different email");
    assert_eq!(store.contacts().get_all().expect("list").len(), 2);
}

#[test]
fn list_keeps_insertion_order() {
    let store = Store::open_in_memory();
    let names = ["Charlie", "Alice", "Bob"];
    for (idx, name) in names.iter().enumerate() {
        let email = format!("user{idx}@example.com");
        store
            .contacts()
            .add(&Contact::new(form(name, &email, "hello")))
            .expect("add");
    }
    let listed: Vec<String> = store
        .contacts()
        .get_all()
        .expect("list")
        .into_iter()
        .map(|contact| contact.name)
        .collect();
    assert_eq!(listed, names);
}

#[test]
fn remove_unknown_id_leaves_collection_unchanged() {
    let store = Store::open_in_memory();
    let contact = Contact::new(form("Ada", "ada@example.com", "a"));
    store.contacts().add(&contact).expect("add");

    let err = store
        .contacts()
        .remove(ContactId::from_raw(contact.id.as_i64() + 1))
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
    assert_eq!(store.contacts().get_all().expect("list").len(), 1);
}

#[test]
fn update_replaces_in_place_and_touches() {
    let store = Store::open_in_memory();
    let created = Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap();
    let first = Contact::new_at(form("Ada", "ada@example.com", "a"), created);
    let second = Contact::new_at(form("Grace", "grace@example.com", "b"), created);
    store.contacts().add(&first).expect("add first");
    store.contacts().add(&second).expect("add second");

    let mut edited = first.clone();
    edited.phone = "555-0199".to_string();
    let later = created + Duration::hours(3);
    store.contacts().update_at(later, &mut edited).expect("update");
    assert_eq!(edited.updated_at, later);

    let all = store.contacts().get_all().expect("list");
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[0].phone, "555-0199");
    assert_eq!(all[0].created_at, created);
    assert_eq!(all[0].updated_at, later);
    assert_eq!(all[1], second);
}

#[test]
fn update_rejects_unknown_and_invalid() {
    let store = Store::open_in_memory();
    let mut stranger = Contact::new(form("Ada", "ada@example.com", "a"));
    let err = store.contacts().update(&mut stranger).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == stranger.id));

    store.contacts().add(&stranger).expect("add");
    let mut broken = stranger.clone();
    broken.message = "short".to_string();
    let err = store.contacts().update(&mut broken).unwrap_err();
    assert_eq!(err.issues(), Some(&[ContactIssue::MessageTooShort][..]));

    let stored = store
        .contacts()
        .get_by_id(stranger.id)
        .expect("get")
        .expect("exists");
    assert_eq!(stored, stranger);
}

#[test]
fn clear_drops_everything() {
    let store = Store::open_in_memory();
    store
        .contacts()
        .add(&Contact::new(form("Ada", "ada@example.com", "a")))
        .expect("add");
    assert!(store.contacts().get_storage_size().expect("size") > 0);

    store.contacts().clear().expect("clear");
    assert!(store.contacts().get_all().expect("list").is_empty());
    assert_eq!(store.contacts().get_storage_size().expect("size"), 0);
    store.contacts().clear().expect("clear again");
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let store = Store::open_in_memory();
    let mut ada = Contact::new(form("Ada Lovelace", "ada@example.com", "Engines"));
    ada.message = "Analytical notes for review.".to_string();
    let grace = Contact::new(form("Grace Hopper", "grace@navy.mil", "compilers"));
    store.contacts().add(&ada).expect("add ada");
    store.contacts().add(&grace).expect("add grace");

    let by_name = store.contacts().search("LOVELACE").expect("search");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, ada.id);

    let by_reason = store.contacts().search("engines").expect("search");
    assert_eq!(by_reason.len(), 1);

    let by_message = store.contacts().search("analytical").expect("search");
    assert_eq!(by_message[0].id, ada.id);

    let by_email = store.contacts().search("NAVY").expect("search");
    assert_eq!(by_email[0].id, grace.id);

    assert!(store.contacts().search("nobody").expect("search").is_empty());
    assert_eq!(store.contacts().search("").expect("search").len(), 2);
}

#[test]
fn date_range_is_inclusive() {
    let store = Store::open_in_memory();
    let base = Utc.with_ymd_and_hms(2030, 5, 1, 0, 0, 0).unwrap();
    for day in 0..5 {
        let email = format!("day{day}@example.com");
        let contact = Contact::new_at(form("Ada", &email, "a"), base + Duration::days(day));
        store.contacts().add(&contact).expect("add");
    }

    let hits = store
        .contacts()
        .get_by_date_range(base + Duration::days(1), base + Duration::days(3))
        .expect("range");
    let emails: Vec<&str> = hits.iter().map(|contact| contact.email.as_str()).collect();
    assert_eq!(
        emails,
        ["day1@example.com", "day2@example.com", "day3@example.com"]
    );
}

#[test]
fn storage_key_is_configurable() {
    let store = Store::open_in_memory().with_key("inbox");
    assert_eq!(store.key(), "inbox");
    store
        .contacts()
        .add(&Contact::new(form("Ada", "ada@example.com", "a")))
        .expect("add");

    use formbox_store::KeyValueStore;
    assert!(store.backend().get("inbox").expect("get").is_some());
    assert!(store.backend().get("contacts").expect("get").is_none());
}
