//! History store trait.
//!
//! Defines the key-value interface conversation histories are persisted
//! through. Keys and values are plain strings; the JSON encoding of a
//! history is the caller's job, so a backend never needs to understand the
//! turn format. Implementations live in confab-infra.

use confab_types::error::StorageError;

/// Trait for string-keyed, string-valued persistent storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait HistoryStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Set the value for a key, fully overwriting any previous value.
    fn put(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Delete a key. No-op if the key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
