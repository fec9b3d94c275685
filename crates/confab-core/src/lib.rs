//! Business logic and port traits for Confab.
//!
//! This crate defines the "ports" (`HistoryStore`, `LlmProvider`) that the
//! infrastructure layer implements, and the `ChatService` that owns the
//! conversation lifecycle. It depends only on `confab-types` -- never on
//! `confab-infra` or any database/HTTP crate.

pub mod chat;
pub mod llm;
pub mod storage;
