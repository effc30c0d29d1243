//! Profile error types.

use finguru_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Profile-related errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A field of the submitted payload is missing or malformed.
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        /// Offending field.
        field: &'static str,
        /// Reason.
        message: String,
    },

    /// The user has not completed onboarding.
    #[error("Profile not found")]
    NotFound,

    /// The store could not be reached.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

impl ProfileError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::InvalidArgument { field, message } => Self::invalid(field, message),
            ProfileError::NotFound => Self::NotFound("User profile not found".to_string()),
            ProfileError::StorageUnavailable(e) => Self::StorageUnavailable(e.to_string()),
        }
    }
}
