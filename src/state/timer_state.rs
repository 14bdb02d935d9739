//! Timer state machine
//!
//! Pure elapsed-time accounting: every operation takes the current wall-clock
//! instant instead of reading a clock, so the transitions are total functions
//! of `(state, now)`.

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Label used when no task has been chosen
pub const NO_TASK_SELECTED: &str = "No task selected";

/// Message shown when relabeling is attempted mid-session
pub const TASK_LOCKED_MESSAGE: &str = "Cannot change task while timer is running";

/// Run status of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerStatus {
    Stopped,
    Running,
    Paused,
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TimerStatus::Stopped => "Stopped",
            TimerStatus::Running => "Running",
            TimerStatus::Paused => "Paused",
        };
        f.write_str(name)
    }
}

/// Which transition the primary "play" action performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Started,
    Resumed,
    Ignored,
}

/// Timer state for the current focus session
#[derive(Debug, Clone)]
pub struct TimerState {
    task_label: String,
    status: TimerStatus,
    elapsed_millis: i64,
    /// Only meaningful while running
    anchor_epoch_millis: i64,
    carried_millis: i64,
}

/// Read-only view of the timer handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub task_label: String,
    pub status: TimerStatus,
    pub elapsed_millis: i64,
    pub display: String,
}

impl TimerState {
    /// Create a stopped timer with no task selected
    pub fn new() -> Self {
        Self {
            task_label: NO_TASK_SELECTED.to_string(),
            status: TimerStatus::Stopped,
            elapsed_millis: 0,
            anchor_epoch_millis: 0,
            carried_millis: 0,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn elapsed_millis(&self) -> i64 {
        self.elapsed_millis
    }

    pub fn carried_millis(&self) -> i64 {
        self.carried_millis
    }

    pub fn task_label(&self) -> &str {
        &self.task_label
    }

    /// Label stamped onto laps; an empty label falls back to the sentinel
    pub fn lap_label(&self) -> String {
        if self.task_label.is_empty() {
            NO_TASK_SELECTED.to_string()
        } else {
            self.task_label.clone()
        }
    }

    /// Begin a fresh session. Ignored unless stopped.
    pub fn start(&mut self, now_ms: i64) -> bool {
        if self.status != TimerStatus::Stopped {
            return false;
        }
        self.status = TimerStatus::Running;
        self.anchor_epoch_millis = now_ms;
        self.elapsed_millis = 0;
        self.carried_millis = 0;
        true
    }

    /// Freeze elapsed time. Ignored unless running.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Paused;
        self.carried_millis = self.elapsed_millis;
        true
    }

    /// Continue a paused session from exactly where it froze.
    pub fn resume(&mut self, now_ms: i64) -> bool {
        if self.status != TimerStatus::Paused {
            return false;
        }
        // Fold the banked time into the anchor so `now - anchor == carried`.
        self.anchor_epoch_millis = now_ms - self.carried_millis;
        self.elapsed_millis = self.carried_millis;
        self.carried_millis = 0;
        self.status = TimerStatus::Running;
        true
    }

    /// Start when stopped, resume when paused, nothing while running
    pub fn primary(&mut self, now_ms: i64) -> PrimaryAction {
        match self.status {
            TimerStatus::Running => PrimaryAction::Ignored,
            TimerStatus::Paused => {
                self.resume(now_ms);
                PrimaryAction::Resumed
            }
            TimerStatus::Stopped => {
                self.start(now_ms);
                PrimaryAction::Started
            }
        }
    }

    /// Return to a fresh stopped timer with no task selected
    pub fn reset(&mut self) {
        self.task_label = NO_TASK_SELECTED.to_string();
        self.status = TimerStatus::Stopped;
        self.elapsed_millis = 0;
        self.carried_millis = 0;
        self.anchor_epoch_millis = 0;
    }

    /// Recompute elapsed time. Ignored unless running.
    pub fn tick(&mut self, now_ms: i64) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        let elapsed = (now_ms - self.anchor_epoch_millis).max(0);
        // Never move backwards if the wall clock does.
        self.elapsed_millis = self.elapsed_millis.max(elapsed);
        true
    }

    /// Relabel the session; rejected while running
    pub fn select_task(&mut self, label: impl Into<String>) -> Result<(), TimerError> {
        if self.status == TimerStatus::Running {
            return Err(TimerError::InvalidOperation(TASK_LOCKED_MESSAGE.to_string()));
        }
        self.task_label = label.into();
        Ok(())
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            task_label: self.task_label.clone(),
            status: self.status,
            elapsed_millis: self.elapsed_millis,
            display: format_elapsed(self.elapsed_millis),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        TimerState::new().snapshot()
    }
}

/// Format milliseconds as "MM:SS"; minutes are not wrapped into hours
pub fn format_elapsed(elapsed_millis: i64) -> String {
    let total_secs = elapsed_millis.max(0) / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped_with_sentinel_label() {
        let timer = TimerState::new();
        assert_eq!(timer.status(), TimerStatus::Stopped);
        assert_eq!(timer.elapsed_millis(), 0);
        assert_eq!(timer.task_label(), NO_TASK_SELECTED);
    }

    #[test]
    fn start_is_ignored_while_running() {
        let mut timer = TimerState::new();
        assert!(timer.start(0));
        timer.tick(700);
        assert!(!timer.start(500));
        timer.tick(1_000);
        assert_eq!(timer.elapsed_millis(), 1_000);
    }

    #[test]
    fn pause_then_resume_does_not_jump() {
        let mut timer = TimerState::new();
        timer.start(0);
        timer.tick(1_000);
        assert!(timer.pause());
        assert_eq!(timer.carried_millis(), 1_000);

        // five seconds of wall time pass while paused
        assert!(!timer.tick(6_000));
        assert!(timer.resume(6_000));
        assert_eq!(timer.elapsed_millis(), 1_000);
        timer.tick(6_000);
        assert_eq!(timer.elapsed_millis(), 1_000);

        timer.tick(6_500);
        assert_eq!(timer.elapsed_millis(), 1_500);
    }

    #[test]
    fn repeated_pause_resume_cycles_accumulate() {
        let mut timer = TimerState::new();
        timer.start(0);
        let mut now = 0;
        for _ in 0..5 {
            now += 300;
            timer.tick(now);
            let before = timer.elapsed_millis();
            timer.pause();
            now += 10_000;
            timer.resume(now);
            assert_eq!(timer.elapsed_millis(), before);
        }
        assert_eq!(timer.elapsed_millis(), 1_500);
    }

    #[test]
    fn resume_only_from_paused() {
        let mut timer = TimerState::new();
        assert!(!timer.resume(100));
        timer.start(0);
        assert!(!timer.resume(100));
        assert_eq!(timer.status(), TimerStatus::Running);
    }

    #[test]
    fn primary_starts_resumes_or_ignores() {
        let mut timer = TimerState::new();
        assert_eq!(timer.primary(0), PrimaryAction::Started);
        assert_eq!(timer.primary(10), PrimaryAction::Ignored);
        timer.tick(2_000);
        timer.pause();
        assert_eq!(timer.primary(9_000), PrimaryAction::Resumed);
        assert_eq!(timer.elapsed_millis(), 2_000);
    }

    #[test]
    fn reset_from_any_state() {
        for pause_first in [false, true] {
            let mut timer = TimerState::new();
            timer.start(0);
            timer.tick(4_200);
            if pause_first {
                timer.pause();
            }
            timer.reset();
            assert_eq!(timer.status(), TimerStatus::Stopped);
            assert_eq!(timer.elapsed_millis(), 0);
            assert_eq!(timer.carried_millis(), 0);
            assert_eq!(timer.task_label(), NO_TASK_SELECTED);
            assert!(!timer.tick(9_000));
        }
    }

    #[test]
    fn select_task_rejected_while_running() {
        let mut timer = TimerState::new();
        timer.select_task("Write report").unwrap();
        timer.start(0);

        let err = timer.select_task("Something else").unwrap_err();
        assert_eq!(err, TimerError::InvalidOperation(TASK_LOCKED_MESSAGE.to_string()));
        assert_eq!(timer.task_label(), "Write report");

        timer.pause();
        assert!(timer.select_task("Review code").is_ok());
        assert_eq!(timer.task_label(), "Review code");
    }

    #[test]
    fn tick_never_goes_backwards() {
        let mut timer = TimerState::new();
        timer.start(10_000);
        timer.tick(12_000);
        timer.tick(11_000);
        assert_eq!(timer.elapsed_millis(), 2_000);
    }

    #[test]
    fn empty_label_falls_back_to_sentinel_for_laps() {
        let mut timer = TimerState::new();
        timer.select_task("").unwrap();
        assert_eq!(timer.lap_label(), NO_TASK_SELECTED);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(999), "00:00");
        assert_eq!(format_elapsed(61_000), "01:01");
        assert_eq!(format_elapsed(1_500_000), "25:00");
        assert_eq!(format_elapsed(6_000_000), "100:00");
    }

    #[test]
    fn snapshot_carries_display_string() {
        let mut timer = TimerState::new();
        timer.start(0);
        timer.tick(65_400);
        let snap = timer.snapshot();
        assert_eq!(snap.status, TimerStatus::Running);
        assert_eq!(snap.display, "01:05");
        assert_eq!(snap.elapsed_millis, 65_400);
    }
}
