//! Console front end
//!
//! Line-oriented commands in, plain-text rendering out. This is the whole
//! boundary between a person at a terminal and the [`Session`](crate::state::Session).

pub mod commands;
pub mod handlers;
pub mod render;

// Re-export commonly used items
pub use commands::{Command, ConsoleError, TaskSelection};
pub use handlers::{handle_command, Reply};
pub use render::watch_display;
