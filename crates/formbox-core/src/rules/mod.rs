pub mod recency;
pub mod stats;
pub mod validation;

pub use recency::{days_elapsed, is_recent, RECENT_WINDOW_DAYS};
pub use stats::compute_stats;
pub use validation::{validate_contact, ContactIssue, MIN_MESSAGE_CHARS};
