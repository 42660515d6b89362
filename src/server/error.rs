use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{ErrorKind, StatsError};
use crate::model::Source;

/// Errors returned by the HTTP handlers.
///
/// Every response body has the fixed shape `{"error": "<message>"}`; the
/// underlying error is logged, never sent.
#[derive(Debug)]
pub enum ApiError {
    /// A single-source endpoint failed.
    Source { platform: Source, error: StatsError },
    /// The combined lookup failed.
    Lookup(StatsError),
}

impl ApiError {
    pub fn source(platform: Source) -> impl FnOnce(StatsError) -> Self {
        move |error| ApiError::Source { platform, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Source { platform, error } => {
                tracing::error!(%platform, error = %error, "source request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    platform.failure_message().to_string(),
                )
            }
            ApiError::Lookup(error) if error.kind() == ErrorKind::UserNotFound => {
                (StatusCode::NOT_FOUND, error.to_string())
            }
            ApiError::Lookup(error) => {
                tracing::error!(error = %error, "stats lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch stats".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
