pub mod error;
pub mod facade;

pub use error::{FacadeError, FacadeErrorKind, Result};
pub use facade::{ContactExport, ContactFacade};
