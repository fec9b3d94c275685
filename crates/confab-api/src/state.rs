//! Application state wiring storage and inference together.
//!
//! `AppState` holds what every command needs: the resolved data directory,
//! the loaded config, and the database pool. The HTTP server additionally
//! needs Workers AI credentials, so `HttpState` (the router state) is built
//! on demand and fails early with a clear message when they are missing.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use secrecy::SecretString;

use confab_core::chat::ChatService;
use confab_infra::config::{load_config, resolve_data_dir};
use confab_infra::llm::WorkersAiProvider;
use confab_infra::sqlite::{DatabasePool, SqliteHistoryStore};
use confab_types::config::AppConfig;

/// Concrete type alias for the service generics pinned to the infra
/// implementations.
pub type ConcreteChatService = ChatService<SqliteHistoryStore, WorkersAiProvider>;

/// Shared application state used by all CLI commands.
pub struct AppState {
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

/// Router state for the HTTP server.
#[derive(Clone)]
pub struct HttpState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Initialize the application state: resolve the data directory, load
    /// config, connect to the database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = load_config(&data_dir).await;
        if let Ok(account_id) = std::env::var("CONFAB_ACCOUNT_ID") {
            config.llm.account_id = Some(account_id);
        }

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("confab.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        Ok(Self {
            config,
            data_dir,
            db_pool,
        })
    }

    /// Build the HTTP-serving state. Requires Workers AI credentials:
    /// an account id (config or `CONFAB_ACCOUNT_ID`) and the
    /// `CLOUDFLARE_API_TOKEN` environment variable.
    pub fn http_state(&self) -> anyhow::Result<HttpState> {
        let account_id = self.config.llm.account_id.clone().context(
            "no Cloudflare account id configured; set llm.account_id in config.toml \
             or the CONFAB_ACCOUNT_ID environment variable",
        )?;
        let api_token = std::env::var("CLOUDFLARE_API_TOKEN")
            .map(SecretString::from)
            .context("CLOUDFLARE_API_TOKEN is not set")?;

        let mut provider =
            WorkersAiProvider::new(api_token, account_id, self.config.llm.model.clone());
        if let Some(base_url) = &self.config.llm.base_url {
            provider = provider.with_base_url(base_url.clone());
        }

        let store = SqliteHistoryStore::new(self.db_pool.clone());
        let mut chat_service =
            ChatService::new(store, provider, self.config.llm.model.clone());
        if self.config.server.serialize_sessions {
            chat_service = chat_service.with_serialized_sessions();
        }

        Ok(HttpState {
            chat_service: Arc::new(chat_service),
        })
    }
}
