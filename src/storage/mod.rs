/// Storage layer for persisting habit records
///
/// The repository only ever talks to a small key/value contract, so any
/// conforming backend can hold the data. Two backends ship here: an
/// in-memory map and a SQLite-backed store.

pub mod memory;
pub mod schema;
pub mod sqlite;

// Re-export the main storage types
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage connection error: {0}")]
    Connection(String),

    #[error("Storage query error: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Key/value contract the repository depends on
///
/// No transactional guarantees are assumed: `get` on an absent key is
/// `Ok(None)`, `delete` on an absent key succeeds, and read-modify-write
/// sequences built on top are last-writer-wins.
pub trait KeyValueStore {
    /// Get the value stored at `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` at `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value at `key`; absent keys are not an error
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Every key currently in the store, habit-related or not
    fn list_keys(&self) -> Result<Vec<String>, StorageError>;
}
