//! Focus Time - a focus timer with lap tracking
//!
//! This library provides the stopwatch-style timer state machine, the
//! persisted lap ledger and a console front end that drives them.

pub mod clock;
pub mod config;
pub mod console;
pub mod error;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{SessionError, StorageError, TimerError};
pub use state::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use utils::signals::shutdown_signal;
