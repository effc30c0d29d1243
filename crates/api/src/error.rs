//! Error-to-response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use finguru_shared::AppError;
use finguru_shared::types::UserId;
use serde_json::json;
use tracing::{debug, error};

/// An [`AppError`] rendered as `{"error", "message", "field"?}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    AppError: From<E>,
{
    fn from(err: E) -> Self {
        Self(AppError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut body = json!({
            "error": self.0.error_code(),
            "message": self.0.public_message(),
        });
        if let Some(field) = self.0.field() {
            body["field"] = json!(field);
        }
        (status, Json(body)).into_response()
    }
}

/// Renders a failed operation, logging server-side failures.
///
/// Storage and internal errors are logged with the operation name and the
/// underlying cause; clients only see the generic message.
pub(crate) fn failure(operation: &'static str, user: &UserId, err: impl Into<ApiError>) -> Response {
    let err = err.into();
    if err.0.status_code() >= 500 {
        error!(operation, user_id = %user, error = %err.0, "Request failed");
    } else {
        debug!(operation, user_id = %user, error = %err.0, "Request rejected");
    }
    err.into_response()
}
