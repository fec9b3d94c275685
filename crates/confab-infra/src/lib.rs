//! Infrastructure implementations for Confab.
//!
//! Concrete backends for the ports defined in `confab-core`: the SQLite
//! history store and the Workers AI inference client, plus configuration
//! loading.

pub mod config;
pub mod llm;
pub mod sqlite;
