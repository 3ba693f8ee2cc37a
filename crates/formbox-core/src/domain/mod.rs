pub mod contact;
pub mod email;
pub mod ids;
pub mod patch;

pub use contact::{Contact, ContactForm};
pub use email::is_valid_email;
pub use ids::ContactId;
pub use patch::ContactPatch;
