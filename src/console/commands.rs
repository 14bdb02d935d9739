//! Command parsing

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

/// How the user picked a task in `select`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSelection {
    /// 1-based position in the list shown by `tasks`
    Index(usize),
    Label(String),
}

/// Inbound command from the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start when stopped, resume when paused
    Primary,
    Pause,
    Reset,
    Lap,
    ClearLaps,
    Select(TaskSelection),
    Tasks,
    Laps,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "start" | "play" | "resume" | "s" => Command::Primary,
            "pause" | "p" => Command::Pause,
            "reset" | "r" => Command::Reset,
            "lap" | "l" => Command::Lap,
            "clear" => Command::ClearLaps,
            "select" | "task" => {
                if rest.is_empty() {
                    return Err(ConsoleError::MissingArgument("select"));
                }
                match rest.parse::<usize>() {
                    Ok(index) => Command::Select(TaskSelection::Index(index)),
                    Err(_) => Command::Select(TaskSelection::Label(rest.to_string())),
                }
            }
            "tasks" => Command::Tasks,
            "laps" => Command::Laps,
            "status" | "" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(ConsoleError::UnknownCommand(word.to_string())),
        };
        Ok(command)
    }
}
