use crate::rules::ContactIssue;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid contact: {}", join_issues(.0))]
    InvalidContact(Vec<ContactIssue>),
}

fn join_issues(issues: &[ContactIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
