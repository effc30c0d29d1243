//! Budget error types.

use finguru_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Missing or malformed category or amount.
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        /// Offending field.
        field: &'static str,
        /// Reason.
        message: String,
    },

    /// The store could not be reached; nothing was applied.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

impl BudgetError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::InvalidArgument { field, message } => Self::invalid(field, message),
            BudgetError::StorageUnavailable(e) => Self::StorageUnavailable(e.to_string()),
        }
    }
}
