//! JSON body extractor that answers bad bodies with the API error shape.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use finguru_shared::AppError;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// [`Json`] with `INVALID_ARGUMENT` rejections.
///
/// A body that is not JSON, not an object of the expected shape, or sent
/// without a JSON content type becomes a 400 naming the `body` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_error(&rejection)),
        }
    }
}

fn body_error(rejection: &JsonRejection) -> ApiError {
    debug!(status = %rejection.status(), error = %rejection.body_text(), "Rejected request body");
    ApiError(AppError::invalid("body", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use http_body_util::BodyExt;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<AppJson<Payload>, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        AppJson::<Payload>::from_request(request, &()).await
    }

    async fn rejection_body(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let AppJson(payload) = extract(Some("application/json"), r#"{"name": "x"}"#)
            .await
            .unwrap();
        assert_eq!(payload.name, "x");
    }

    #[tokio::test]
    async fn test_bad_bodies_are_invalid_argument() {
        for (content_type, body) in [
            (Some("application/json"), "{not json"),
            (Some("application/json"), r#"{"name": 5}"#),
            (Some("application/json"), "[]"),
            (None, r#"{"name": "x"}"#),
        ] {
            let err = extract(content_type, body).await.unwrap_err();
            let (status, json) = rejection_body(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(json["error"], "INVALID_ARGUMENT");
            assert_eq!(json["field"], "body");
        }
    }
}
