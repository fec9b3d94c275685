//! Conversation lifecycle: constants, history trimming, and the service.

pub mod service;

pub use service::ChatService;

use confab_types::chat::ChatTurn;

/// Maximum number of turns retained per session at rest.
pub const HISTORY_WINDOW: usize = 20;

/// Fixed persona instruction prepended to every prompt. Never persisted.
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Be concise and friendly.";

/// Substituted (and persisted) when the backend returns no usable text.
pub const FALLBACK_REPLY: &str = "Sorry, I could not generate a response.";

/// Generation parameters, fixed for every request.
pub const MAX_TOKENS: u32 = 512;
pub const TEMPERATURE: f64 = 0.7;

/// Storage key for a session's history.
pub fn history_key(session_id: &str) -> String {
    format!("chat:{session_id}")
}

/// Truncate a history to the last [`HISTORY_WINDOW`] turns, oldest dropped
/// first, order preserved.
pub fn trim_to_window(turns: &mut Vec<ChatTurn>) {
    if turns.len() > HISTORY_WINDOW {
        turns.drain(..turns.len() - HISTORY_WINDOW);
    }
}
