//! Directory-backed store: one `<key>.json` file per document

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::KeyValueStore;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store documents under `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No document at {}", path.display());
                Ok(None)
            }
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(write_err)?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
