//! Versioned JSON array documents

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::KeyValueStore;
use crate::error::StorageError;

/// Version written into every saved document
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentOut<'a, T> {
    version: u32,
    items: &'a [T],
}

#[derive(Deserialize)]
struct DocumentIn<T> {
    version: u32,
    items: Vec<T>,
}

/// Either the current envelope or the unversioned bare array older builds wrote
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument<T> {
    Versioned(DocumentIn<T>),
    Legacy(Vec<T>),
}

/// Items read from a document, and whether they came from the legacy format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument<T> {
    pub items: Vec<T>,
    /// The unversioned bare array; older builds wrote lap arrays newest-first
    pub legacy: bool,
}

/// Load the document stored under `key`; a missing document is an empty array
pub fn load_document<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<LoadedDocument<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(LoadedDocument {
            items: Vec::new(),
            legacy: false,
        });
    };

    let stored: StoredDocument<T> =
        serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })?;

    match stored {
        StoredDocument::Versioned(doc) if doc.version > DOCUMENT_VERSION => {
            Err(StorageError::UnsupportedVersion {
                key: key.to_string(),
                version: doc.version,
            })
        }
        StoredDocument::Versioned(doc) => Ok(LoadedDocument {
            items: doc.items,
            legacy: false,
        }),
        StoredDocument::Legacy(items) => Ok(LoadedDocument {
            items,
            legacy: true,
        }),
    }
}

/// Load the array stored under `key`, in stored order
pub fn load_items<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    load_document(store, key).map(|doc| doc.items)
}

/// Replace the document under `key` with `items`
pub fn save_items<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    let doc = DocumentOut {
        version: DOCUMENT_VERSION,
        items,
    };
    let raw = serde_json::to_string(&doc).map_err(|source| StorageError::Malformed {
        key: key.to_string(),
        source,
    })?;
    store.put(key, &raw)
}
