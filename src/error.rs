//! Error types shared across the crate

use thiserror::Error;

/// Rejections produced by the timer state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The user attempted a state change the current status forbids
    #[error("{0}")]
    InvalidOperation(String),
}

/// Failures reading or writing persisted documents
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document {key} has unsupported version {version}")]
    UnsupportedVersion { key: String, version: u32 },

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Errors surfaced by the session controller
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("failed to lock {0}")]
    LockPoisoned(&'static str),
}
