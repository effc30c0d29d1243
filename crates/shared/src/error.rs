//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A request field is missing or malformed.
    #[error("Invalid argument `{field}`: {message}")]
    InvalidArgument {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable reason.
        message: String,
    },

    /// The backing store is unreachable or misconfigured.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for an [`AppError::InvalidArgument`].
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::InvalidArgument { .. } => 400,
            Self::ExternalService(_) => 502,
            Self::StorageUnavailable(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message that is safe to show to API clients.
    ///
    /// Storage and internal diagnostics never leave the server.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::StorageUnavailable(_) | Self::Internal(_) => "An error occurred".to_string(),
            Self::ExternalService(_) => "Upstream service unavailable".to_string(),
            Self::InvalidArgument { message, .. } => message.clone(),
            Self::Unauthorized(msg) | Self::NotFound(msg) => msg.clone(),
        }
    }

    /// Returns the offending field for validation errors.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { field, .. } => Some(field),
            _ => None,
        }
    }
}
