use formbox_core::{ContactId, CoreError};
use formbox_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FacadeError {
    #[error("invalid contact: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("contact not found: {0}")]
    NotFound(ContactId),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(#[source] StoreError),
    #[error("import failed: {0}")]
    ImportParse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FacadeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacadeErrorKind {
    Validation,
    NotFound,
    Conflict,
    Storage,
    ImportParse,
    Io,
}

impl FacadeError {
    pub fn kind(&self) -> FacadeErrorKind {
        match self {
            FacadeError::Validation(_) => FacadeErrorKind::Validation,
            FacadeError::NotFound(_) => FacadeErrorKind::NotFound,
            FacadeError::Conflict(_) => FacadeErrorKind::Conflict,
            FacadeError::Storage(_) => FacadeErrorKind::Storage,
            FacadeError::ImportParse(_) => FacadeErrorKind::ImportParse,
            FacadeError::Io(_) => FacadeErrorKind::Io,
        }
    }
}

impl From<StoreError> for FacadeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(CoreError::InvalidContact(issues)) => {
                FacadeError::Validation(issues.iter().map(ToString::to_string).collect())
            }
            StoreError::Core(other) => FacadeError::Validation(vec![other.to_string()]),
            StoreError::NotFound(id) => FacadeError::NotFound(id),
            StoreError::DuplicateEmail(email) => {
                FacadeError::Conflict(format!("a contact with email {email} already exists"))
            }
            StoreError::DuplicateId(id) => {
                FacadeError::Conflict(format!("a contact with id {id} already exists"))
            }
            StoreError::ImportParse(message) => FacadeError::ImportParse(message),
            other => FacadeError::Storage(other),
        }
    }
}
