//! Key-value persistence
//!
//! Each key holds one whole JSON document that is rewritten in full on every
//! save. Documents written by different keys are independent; nothing here
//! makes a pair of writes atomic.

pub mod document;
pub mod file_store;
pub mod memory_store;

use crate::error::StorageError;

// Re-export main types
pub use document::{
    load_document, load_items, save_items, LoadedDocument, DOCUMENT_VERSION,
};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Key of the task list document
pub const TASKS_KEY: &str = "saved_tasks";

/// Key of the lap history document
pub const LAP_TIMES_KEY: &str = "saved_lap_times";

/// String-keyed document store
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw document stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
