pub mod backend;
pub mod error;
pub mod file;
pub mod paths;
pub mod repo;

pub use backend::{KeyValueStore, MemoryStorage};
pub use error::{Result, StoreError, StoreErrorKind};
pub use file::FileStorage;

use std::path::Path;

/// Storage key under which the whole contact collection is kept.
pub const DEFAULT_STORAGE_KEY: &str = "contacts";

pub struct Store<S = FileStorage> {
    backend: S,
    key: String,
}

impl Store<FileStorage> {
    pub fn open(path: &Path) -> Result<Self> {
        let backend = FileStorage::open(path)?;
        Ok(Self::with_backend(backend, DEFAULT_STORAGE_KEY))
    }
}

impl Store<MemoryStorage> {
    pub fn open_in_memory() -> Self {
        Self::with_backend(MemoryStorage::new(), DEFAULT_STORAGE_KEY)
    }
}

impl<S: KeyValueStore> Store<S> {
    pub fn with_backend(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn contacts(&self) -> repo::ContactsRepo<'_, S> {
        repo::ContactsRepo::new(&self.backend, &self.key)
    }
}
