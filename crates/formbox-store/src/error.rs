use formbox_core::{ContactId, ContactIssue, CoreError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("storage unavailable: {0}")]
    Backend(String),
    #[error("contact not found: {0}")]
    NotFound(ContactId),
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),
    #[error("duplicate id: {0}")]
    DuplicateId(ContactId),
    #[error("invalid import data: {0}")]
    ImportParse(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Json,
    Core,
    MissingHomeDir,
    InvalidDataPath,
    Backend,
    NotFound,
    DuplicateEmail,
    DuplicateId,
    ImportParse,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Json(_) => StoreErrorKind::Json,
            StoreError::Core(_) => StoreErrorKind::Core,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::Backend(_) => StoreErrorKind::Backend,
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::DuplicateEmail(_) => StoreErrorKind::DuplicateEmail,
            StoreError::DuplicateId(_) => StoreErrorKind::DuplicateId,
            StoreError::ImportParse(_) => StoreErrorKind::ImportParse,
        }
    }

    /// Validation issues carried by this error, if it is a rejected contact.
    pub fn issues(&self) -> Option<&[ContactIssue]> {
        match self {
            StoreError::Core(CoreError::InvalidContact(issues)) => Some(issues),
            _ => None,
        }
    }
}
