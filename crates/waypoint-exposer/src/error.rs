//! Error types for the waypoint endpoint.
//!
//! [`ExposerError`] covers per-request failures. It converts into an
//! Axum HTTP response via its [`IntoResponse`](axum::response::IntoResponse)
//! implementation, so a failing request is answered and contained without
//! touching the accept loop.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur while answering a waypoint request.
#[derive(Debug, thiserror::Error)]
pub enum ExposerError {
    /// The waypoint document could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ExposerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
        };

        tracing::warn!(error = %self, "Waypoint request failed");

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
