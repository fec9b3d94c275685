//! Shared domain types for Confab.
//!
//! This crate contains the types used across the Confab service: chat turns
//! and roles, LLM request/response shapes, configuration, and the error
//! taxonomy.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
