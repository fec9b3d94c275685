//! Error taxonomy for the chat lifecycle.

use thiserror::Error;

use crate::llm::LlmError;

/// Errors from the history store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    /// A stored value exists but is not valid history JSON. Unrecoverable
    /// for the request; the stored value is never silently discarded.
    #[error("corrupt stored history: {0}")]
    Corrupt(String),
}

/// Errors from a chat or clear operation.
///
/// `Validation` maps to HTTP 400; everything else to 500.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Inference(#[from] LlmError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
