//! Application configuration.
//!
//! Deserialized from `config.toml` in the data directory. Every field has
//! a default so a missing or partial file still yields a runnable config
//! (the account id is the one thing that must come from somewhere before
//! the server can talk to the inference backend).

use serde::{Deserialize, Serialize};

/// Default Workers AI model, same one the service was built against.
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Opt-in stronger-consistency mode: serialize same-session requests
    /// behind a per-session lock instead of the default last-write-wins.
    pub serialize_sessions: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            serialize_sessions: false,
        }
    }
}

/// Inference backend settings.
///
/// The API token is deliberately not part of this struct: it comes from the
/// `CLOUDFLARE_API_TOKEN` environment variable only, so it can never end up
/// in a config file on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Cloudflare account id. Required to serve; `CONFAB_ACCOUNT_ID` in the
    /// environment overrides the file.
    pub account_id: Option<String>,
    pub model: String,
    /// API base URL override, for proxies and tests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            account_id: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
        }
    }
}
