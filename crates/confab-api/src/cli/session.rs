//! Session maintenance commands.
//!
//! These talk to the history store directly: inspecting or clearing a
//! stored conversation needs no inference credentials.

use confab_core::chat::history_key;
use confab_core::storage::HistoryStore;
use confab_infra::sqlite::SqliteHistoryStore;
use confab_types::chat::{ChatTurn, MessageRole};

use crate::state::AppState;

/// Print the stored history for a session.
pub async fn history(state: &AppState, session_id: &str, json: bool) -> anyhow::Result<()> {
    let store = SqliteHistoryStore::new(state.db_pool.clone());
    let turns: Vec<ChatTurn> = match store.get(&history_key(session_id)).await? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => Vec::new(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&turns)?);
        return Ok(());
    }

    if turns.is_empty() {
        println!(
            "  {} no stored history for '{}'",
            console::style("∅").dim(),
            console::style(session_id).cyan()
        );
        return Ok(());
    }

    println!();
    for turn in &turns {
        let role = match turn.role {
            MessageRole::User => console::style("user     ").green(),
            MessageRole::Assistant => console::style("assistant").magenta(),
            MessageRole::System => console::style("system   ").dim(),
        };
        println!("  {} {}", role.bold(), turn.content);
    }
    println!();
    println!(
        "  {} turns stored for '{}'",
        console::style(turns.len()).bold(),
        console::style(session_id).cyan()
    );

    Ok(())
}

/// Delete the stored history for a session.
pub async fn clear(state: &AppState, session_id: &str) -> anyhow::Result<()> {
    let store = SqliteHistoryStore::new(state.db_pool.clone());
    store.delete(&history_key(session_id)).await?;

    println!(
        "  {} cleared session '{}'",
        console::style("✓").green(),
        console::style(session_id).cyan()
    );

    Ok(())
}
