//! Chat and clear endpoint handlers.
//!
//! Endpoints:
//! - POST /api/chat  - run one exchange for a session
//! - POST /api/clear - delete a session's stored history
//!
//! Field names are camelCase on the wire. Both handlers accept the body as
//! `Result<Json<_>, JsonRejection>` so a malformed body becomes a 400
//! instead of axum's default rejection.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::HttpState;

/// Request body for a chat exchange.
///
/// Fields are optional so presence is checked in one place (the service's
/// validation) rather than through serde's missing-field rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for a successful chat exchange.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// Request body for clearing a session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body for a successful clear.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
}

/// POST /api/chat - run one exchange and return the assistant reply.
pub async fn chat(
    State(state): State<HttpState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let message = body.message.unwrap_or_default();
    let session_id = body.session_id.unwrap_or_default();

    let reply = state.chat_service.exchange(&session_id, &message).await?;

    Ok(Json(ChatResponse {
        response: reply,
        session_id,
    }))
}

/// POST /api/clear - delete a session's stored history.
///
/// An absent or empty `sessionId` is a no-op success: there is no key to
/// delete, and deleting an absent key is not an error either.
pub async fn clear(
    State(state): State<HttpState>,
    body: Result<Json<ClearRequest>, JsonRejection>,
) -> Result<Json<ClearResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    if let Some(session_id) = body.session_id.filter(|s| !s.is_empty()) {
        state.chat_service.clear(&session_id).await?;
    }

    Ok(Json(ClearResponse { success: true }))
}
