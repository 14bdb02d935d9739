//! State management module
//!
//! This module contains the timer state machine, the lap ledger and the
//! session controller that ties them to persistence.

pub mod lap_ledger;
pub mod session;
pub mod task;
pub mod timer_state;

// Re-export main types
pub use lap_ledger::{LapLedger, LapRecord};
pub use session::{Session, LAPS_CLEARED_MESSAGE};
pub use task::{task_choices, Task, PLACEHOLDER_TASKS};
pub use timer_state::{
    format_elapsed, PrimaryAction, TimerSnapshot, TimerState, TimerStatus, NO_TASK_SELECTED,
    TASK_LOCKED_MESSAGE,
};
