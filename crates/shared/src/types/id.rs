//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `GoalId` where an `ExpenseId` is expected.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(BudgetId, "Unique identifier for a stored budget item.");
typed_id!(ExpenseId, "Unique identifier for an expense.");
typed_id!(GoalId, "Unique identifier for a savings goal.");

/// Longest user id accepted from the identity provider.
pub const MAX_USER_ID_LEN: usize = 128;

/// Reasons a user id is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdError {
    /// Blank after trimming.
    #[error("user id is empty")]
    Empty,
    /// Longer than [`MAX_USER_ID_LEN`].
    #[error("user id exceeds {MAX_USER_ID_LEN} characters")]
    TooLong,
    /// Contains a path separator or control character.
    #[error("user id contains forbidden characters")]
    ForbiddenCharacter,
}

/// Opaque user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validates and wraps a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`UserIdError`] when the id is blank, too long or contains
    /// `/` or control characters.
    pub fn parse(raw: impl Into<String>) -> Result<Self, UserIdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserIdError::Empty);
        }
        if trimmed.chars().count() > MAX_USER_ID_LEN {
            return Err(UserIdError::TooLong);
        }
        if trimmed.chars().any(|c| c == '/' || c.is_control()) {
            return Err(UserIdError::ForbiddenCharacter);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
