//! In-memory store used by tests and ephemeral sessions

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use super::KeyValueStore;
use crate::error::StorageError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.documents
            .lock()
            .map_err(|_| StorageError::LockPoisoned)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let documents = self.documents()?;
        Ok(documents.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut documents = self.documents()?;
        documents.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
