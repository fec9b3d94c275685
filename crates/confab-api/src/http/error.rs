//! Application error type mapping to HTTP status codes.
//!
//! The wire format is the flat `{"error": <message>}` object the bundled
//! frontend expects: 400 for validation failures, 500 for everything else,
//! with the underlying error message passed through verbatim.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use confab_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat lifecycle errors (validation, inference, storage).
    Chat(ChatError),
    /// Request-shape errors caught before reaching the service.
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) | AppError::Chat(ChatError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Chat(err) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
