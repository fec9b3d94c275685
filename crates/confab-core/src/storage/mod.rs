//! Storage port traits.

pub mod history_store;

pub use history_store::HistoryStore;
