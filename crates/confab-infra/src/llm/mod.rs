//! LLM provider implementations.

pub mod workers_ai;

pub use workers_ai::WorkersAiProvider;
