use thiserror::Error;

use crate::data::StorageError;

/// Errors returned by ledger operations.
///
/// Every variant except `Storage` is raised before anything is changed.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Enter a valid amount greater than 0 (got '{input}')")]
    InvalidAmount { input: String },
    #[error("Name '{name}' is already used or invalid")]
    DuplicateOrInvalidName { name: String },
    #[error("No member named '{name}'")]
    MemberNotFound { name: String },
    #[error("No member selected")]
    NoSelection,
    #[error("Failed to save ledger: {0}")]
    Storage(#[from] StorageError),
}

impl LedgerError {
    /// True for errors caused by user input rather than the backend
    pub fn is_user_error(&self) -> bool {
        !matches!(self, LedgerError::Storage(_))
    }
}
