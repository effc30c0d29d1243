//! Goal error types.

use finguru_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Goal-related errors.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A field of the submitted goal is missing or malformed.
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

impl GoalError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }
}

impl From<GoalError> for AppError {
    fn from(err: GoalError) -> Self {
        match err {
            GoalError::InvalidArgument { field, message } => Self::invalid(field, message),
            GoalError::StorageUnavailable(e) => Self::StorageUnavailable(e.to_string()),
        }
    }
}
