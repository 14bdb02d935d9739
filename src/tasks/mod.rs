//! Background tasks module
//!
//! This module contains tasks that run alongside the console front end.

pub mod ticker;

// Re-export main functions
pub use ticker::{tick_task, DEFAULT_TICK};
