//! Command handlers

use tracing::{error, info};

use super::{
    commands::{Command, TaskSelection},
    render::{lap_line, lap_lines, status_line, task_lines, HELP_TEXT},
};
use crate::{
    error::SessionError,
    state::{PrimaryAction, Session, LAPS_CLEARED_MESSAGE},
};

/// Text to show the user after a command, and whether to stop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn from_lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::from_lines(vec![line.into()])
    }

    fn quit() -> Self {
        Self {
            lines: Vec::new(),
            quit: true,
        }
    }
}

/// Apply one command to the session
pub fn handle_command(session: &Session, command: Command) -> Result<Reply, SessionError> {
    let reply = match command {
        Command::Primary => match session.primary()? {
            PrimaryAction::Ignored => Reply::line("Timer is already running"),
            _ => Reply::line(status_line(&session.snapshot()?)),
        },
        Command::Pause => {
            session.pause()?;
            Reply::line(status_line(&session.snapshot()?))
        }
        Command::Reset => {
            session.reset()?;
            Reply::line(status_line(&session.snapshot()?))
        }
        Command::Lap => match session.record_lap()? {
            Some(record) => Reply::line(lap_line(&record)),
            None => Reply::line("Timer not running, lap not added"),
        },
        Command::ClearLaps => {
            session.clear_laps()?;
            Reply::line(LAPS_CLEARED_MESSAGE)
        }
        Command::Select(selection) => select_handler(session, selection)?,
        Command::Tasks => Reply::from_lines(task_lines(&session.task_choices())),
        Command::Laps => Reply::from_lines(lap_lines(&session.laps()?)),
        Command::Status => Reply::line(status_line(&session.snapshot()?)),
        Command::Help => Reply::line(HELP_TEXT),
        Command::Quit => {
            info!("Quit requested");
            Reply::quit()
        }
    };
    Ok(reply)
}

fn select_handler(session: &Session, selection: TaskSelection) -> Result<Reply, SessionError> {
    let label = match selection {
        TaskSelection::Label(label) => label,
        TaskSelection::Index(index) => {
            let choices = session.task_choices();
            match index.checked_sub(1).and_then(|i| choices.get(i)) {
                Some(label) => label.clone(),
                None => return Ok(Reply::line(format!("No task numbered {}", index))),
            }
        }
    };

    match session.select_task(&label) {
        Ok(()) => Ok(Reply::line(status_line(&session.snapshot()?))),
        // The rejection is a notice for the user, not a failure
        Err(SessionError::Timer(rejection)) => Ok(Reply::line(rejection.to_string())),
        Err(e) => {
            error!("Failed to select task: {}", e);
            Err(e)
        }
    }
}
