//! Request middleware and extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, auth_middleware};
pub use json::AppJson;
