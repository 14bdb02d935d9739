//! Plain-text rendering of timer state and laps

use tokio::sync::watch;
use tracing::debug;

use crate::state::{LapRecord, TimerSnapshot};

pub const HELP_TEXT: &str = "\
Commands:
  start | s        start the timer, or resume it when paused
  pause | p        pause the timer
  reset | r        stop and zero the timer (laps are kept)
  lap | l          record a lap while running
  clear            delete all recorded laps
  tasks            list tasks that can be selected
  select <n|text>  choose a task by number or free text (not while running)
  laps             list recorded laps, newest first
  status           show the timer
  quit | q         exit";

/// "[Running] 01:05  Write report"
pub fn status_line(snapshot: &TimerSnapshot) -> String {
    format!("[{}] {}  {}", snapshot.status, snapshot.display, snapshot.task_label)
}

/// "Lap 3  00:42  Write report  (Oct 18, 09:12)"
pub fn lap_line(record: &LapRecord) -> String {
    format!(
        "Lap {}  {}  {}  ({})",
        record.lap_number,
        record.formatted_time(),
        record.task_label,
        record.formatted_date()
    )
}

pub fn lap_lines(records: &[LapRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec!["No laps recorded".to_string()];
    }
    records.iter().map(lap_line).collect()
}

/// Numbered task selector, 1-based to match `select <n>`
pub fn task_lines(choices: &[String]) -> Vec<String> {
    choices
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{:>2}. {}", i + 1, label))
        .collect()
}

/// Print the status line each time the displayed "MM:SS" changes.
///
/// Runs until the session drops its sender.
pub async fn watch_display(mut snapshot_rx: watch::Receiver<TimerSnapshot>) {
    let mut last = String::new();
    while snapshot_rx.changed().await.is_ok() {
        let line = status_line(&snapshot_rx.borrow_and_update());
        if line != last {
            println!("{}", line);
            last = line;
        }
    }
    debug!("Display watcher exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerStatus;

    #[test]
    fn renders_status_line() {
        let snapshot = TimerSnapshot {
            task_label: "Write report".to_string(),
            status: TimerStatus::Running,
            elapsed_millis: 65_000,
            display: "01:05".to_string(),
        };
        assert_eq!(status_line(&snapshot), "[Running] 01:05  Write report");
    }

    #[test]
    fn renders_lap_line() {
        let record = LapRecord::capture(3, 42_000, "Write report", 0);
        let line = lap_line(&record);
        assert!(line.starts_with("Lap 3  00:42  Write report  ("), "{line}");
    }

    #[test]
    fn empty_lap_list_has_placeholder() {
        assert_eq!(lap_lines(&[]), vec!["No laps recorded"]);
    }

    #[test]
    fn task_lines_are_one_based() {
        let lines = task_lines(&["No task selected".to_string(), "Plan".to_string()]);
        assert_eq!(lines, vec![" 1. No task selected", " 2. Plan"]);
    }
}
