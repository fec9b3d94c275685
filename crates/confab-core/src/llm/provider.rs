//! LlmProvider trait definition.
//!
//! The abstraction the inference backend is consumed through: an ordered
//! message sequence plus generation parameters in, generated text out.
//! Implementations live in confab-infra (e.g. `WorkersAiProvider`).

use confab_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM inference backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "workers-ai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
