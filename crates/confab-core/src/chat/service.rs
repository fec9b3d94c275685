//! Chat service orchestrating the conversation lifecycle.
//!
//! One `exchange` call is one linear async sequence: load history, compose
//! the prompt, invoke the provider, append and trim, persist. The store is
//! the sole durable owner of a conversation; the service only ever holds a
//! request-scoped copy, so concurrent requests for the same session race
//! read-modify-write (last write wins) unless the serialized-sessions mode
//! is enabled.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use confab_types::chat::ChatTurn;
use confab_types::error::{ChatError, StorageError};
use confab_types::llm::CompletionRequest;

use super::{
    FALLBACK_REPLY, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE, history_key, trim_to_window,
};
use crate::llm::LlmProvider;
use crate::storage::HistoryStore;

/// Orchestrates history persistence and inference calls.
///
/// Generic over `HistoryStore` and `LlmProvider` so confab-core never
/// depends on confab-infra.
pub struct ChatService<S: HistoryStore, P: LlmProvider> {
    store: S,
    provider: P,
    model: String,
    /// Per-session locks, present only in serialized-sessions mode. Holds
    /// locks, never conversation data.
    session_locks: Option<DashMap<String, Arc<Mutex<()>>>>,
}

impl<S: HistoryStore, P: LlmProvider> ChatService<S, P> {
    /// Create a new chat service with the given store, provider and model.
    pub fn new(store: S, provider: P, model: String) -> Self {
        Self {
            store,
            provider,
            model,
            session_locks: None,
        }
    }

    /// Enable the opt-in stronger-consistency mode: requests for the same
    /// session are mutually exclusive instead of racing last-write-wins.
    pub fn with_serialized_sessions(mut self) -> Self {
        self.session_locks = Some(DashMap::new());
        self
    }

    /// Run one chat exchange: returns the assistant reply after persisting
    /// the updated, truncated history.
    pub async fn exchange(&self, session_id: &str, message: &str) -> Result<String, ChatError> {
        if session_id.is_empty() || message.is_empty() {
            return Err(ChatError::Validation(
                "Missing message or sessionId".to_string(),
            ));
        }

        let _guard = match &self.session_locks {
            Some(locks) => {
                // Clone the Arc out before awaiting so no map shard stays
                // locked across the suspension point.
                let lock = {
                    let entry = locks
                        .entry(session_id.to_string())
                        .or_insert_with(|| Arc::new(Mutex::new(())));
                    Arc::clone(entry.value())
                };
                Some(lock.lock_owned().await)
            }
            None => None,
        };

        let key = history_key(session_id);
        let mut history = self.load_history(&key).await?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatTurn::system(SYSTEM_PROMPT));
        messages.extend(history.iter().cloned());
        messages.push(ChatTurn::user(message));

        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: MAX_TOKENS,
            temperature: Some(TEMPERATURE),
        };

        let response = self.provider.complete(&request).await?;
        let reply = response.into_text().unwrap_or_else(|| {
            debug!(session = session_id, "empty generation, substituting fallback reply");
            FALLBACK_REPLY.to_string()
        });

        // Only the raw user/assistant turns are persisted, never the
        // system instruction.
        history.push(ChatTurn::user(message));
        history.push(ChatTurn::assistant(reply.clone()));
        trim_to_window(&mut history);

        let encoded = serde_json::to_string(&history)
            .map_err(|e| StorageError::Query(format!("failed to encode history: {e}")))?;
        self.store.put(&key, &encoded).await?;

        debug!(
            session = session_id,
            turns = history.len(),
            "exchange complete, history persisted"
        );
        Ok(reply)
    }

    /// Delete a session's stored history. Idempotent: clearing a session
    /// that does not exist succeeds.
    pub async fn clear(&self, session_id: &str) -> Result<(), ChatError> {
        self.store.delete(&history_key(session_id)).await?;
        debug!(session = session_id, "history cleared");
        Ok(())
    }

    /// Load a session's stored history. A missing key is an empty history.
    pub async fn history(&self, session_id: &str) -> Result<Vec<ChatTurn>, ChatError> {
        Ok(self.load_history(&history_key(session_id)).await?)
    }

    async fn load_history(&self, key: &str) -> Result<Vec<ChatTurn>, StorageError> {
        match self.store.get(key).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }
}
