//! WorkersAiProvider -- concrete [`LlmProvider`] implementation for
//! Cloudflare Workers AI.
//!
//! Sends requests to the Workers AI REST endpoint
//! (`/accounts/{account}/ai/run/{model}`) with bearer authentication.
//!
//! The API token is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use confab_core::llm::LlmProvider;
use confab_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use self::types::{WorkersAiEnvelope, WorkersAiMessage, WorkersAiRequest};

/// Cloudflare Workers AI provider.
///
/// Implements [`LlmProvider`] for the Workers AI REST API.
pub struct WorkersAiProvider {
    client: reqwest::Client,
    api_token: SecretString,
    account_id: String,
    base_url: String,
    model: String,
}

impl WorkersAiProvider {
    /// The Cloudflare API base URL.
    const DEFAULT_BASE_URL: &'static str = "https://api.cloudflare.com/client/v4";

    /// Create a new Workers AI provider.
    ///
    /// # Arguments
    ///
    /// * `api_token` - Cloudflare API token wrapped in SecretString
    /// * `account_id` - Cloudflare account id the model runs under
    /// * `model` - Model identifier (e.g. "@cf/meta/llama-3.3-70b-instruct-fp8-fast")
    pub fn new(api_token: SecretString, account_id: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_token,
            account_id,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        }
    }

    /// The default model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full run URL for a given model.
    fn url(&self, model: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, model
        )
    }

    /// Convert a generic [`CompletionRequest`] into the wire request.
    fn to_wire_request(&self, request: &CompletionRequest) -> WorkersAiRequest {
        let messages = request
            .messages
            .iter()
            .map(|m| WorkersAiMessage {
                role: m.role.to_string(),
                content: m.content.clone(),
            })
            .collect();

        WorkersAiRequest {
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

// WorkersAiProvider intentionally does NOT derive Debug to prevent
// accidental exposure of internal state including the API token.

impl LlmProvider for WorkersAiProvider {
    fn name(&self) -> &str {
        "workers-ai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_wire_request(request);
        let model = if request.model.is_empty() {
            &self.model
        } else {
            &request.model
        };
        let url = self.url(model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let envelope: WorkersAiEnvelope = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        if !envelope.success {
            return Err(LlmError::Provider {
                message: envelope.error_summary(),
            });
        }

        Ok(CompletionResponse {
            text: envelope.result.and_then(|r| r.response),
        })
    }
}
