//! Expense error types.

use finguru_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Expense-related errors.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// A field of the submitted expense is missing or malformed.
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        /// Offending field.
        field: &'static str,
        /// Reason.
        message: String,
    },

    /// The store could not be reached.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

impl ExpenseError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::InvalidArgument { field, message } => Self::invalid(field, message),
            ExpenseError::StorageUnavailable(e) => Self::StorageUnavailable(e.to_string()),
        }
    }
}
