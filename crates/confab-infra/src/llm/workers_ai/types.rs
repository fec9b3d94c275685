//! Workers AI REST API wire types.
//!
//! These are Cloudflare-specific request/response structures for the
//! `/accounts/{account}/ai/run/{model}` endpoint. They are NOT the generic
//! LLM types from confab-types -- those are provider-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for a text-generation model run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkersAiRequest {
    pub messages: Vec<WorkersAiMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// A single message in a Workers AI conversation.
#[derive(Debug, Clone, Serialize)]
pub struct WorkersAiMessage {
    pub role: String,
    pub content: String,
}

/// The standard Cloudflare API envelope around a model run result.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkersAiEnvelope {
    pub result: Option<WorkersAiResult>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<WorkersAiApiError>,
}

impl WorkersAiEnvelope {
    /// Join the envelope's error messages into one line for surfacing.
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "unknown Workers AI error".to_string();
        }
        self.errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{code}: {}", e.message),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Generation result for text models.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkersAiResult {
    pub response: Option<String>,
}

/// One entry of the envelope's `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkersAiApiError {
    pub code: Option<i64>,
    pub message: String,
}
