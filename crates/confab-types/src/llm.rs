//! LLM request/response types.
//!
//! These model the provider-agnostic completion contract: an ordered
//! sequence of role-tagged turns plus generation parameters in, generated
//! text (or nothing) out. Provider-specific wire structures live in
//! `confab-infra`.

use serde::{Deserialize, Serialize};

pub use crate::chat::{ChatTurn, MessageRole};

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier. When empty, the provider's configured default is used.
    pub model: String,
    /// Conversation sent verbatim, system turn included.
    pub messages: Vec<ChatTurn>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from an LLM provider.
///
/// `text` is `None` when the backend answered successfully but produced no
/// usable output; callers decide whether that is an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: Option<String>,
}

impl CompletionResponse {
    /// The generated text, if it is non-empty.
    pub fn into_text(self) -> Option<String> {
        self.text.filter(|t| !t.is_empty())
    }
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,
}
