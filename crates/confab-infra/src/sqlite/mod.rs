//! SQLite-backed storage.

pub mod history;
pub mod pool;

pub use history::SqliteHistoryStore;
pub use pool::DatabasePool;
