//! Lap records and the ledger that holds them

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::timer_state::format_elapsed;

/// A single lap snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapRecord {
    pub id: String,
    pub lap_number: u32,
    #[serde(alias = "timeInMillis")]
    pub elapsed_millis_at_lap: i64,
    #[serde(alias = "taskName")]
    pub task_label: String,
    #[serde(alias = "timestamp")]
    pub captured_at_epoch_millis: i64,
}

impl LapRecord {
    /// Build a record stamped at `now_ms`
    pub fn capture(
        lap_number: u32,
        elapsed_millis: i64,
        task_label: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            id: format!("{}-{}", now_ms, lap_number),
            lap_number,
            elapsed_millis_at_lap: elapsed_millis,
            task_label: task_label.into(),
            captured_at_epoch_millis: now_ms,
        }
    }

    /// Elapsed time at the lap as "MM:SS"
    pub fn formatted_time(&self) -> String {
        format_elapsed(self.elapsed_millis_at_lap)
    }

    /// Capture time as "Mon dd, HH:mm" in local time
    pub fn formatted_date(&self) -> String {
        match Local.timestamp_millis_opt(self.captured_at_epoch_millis).single() {
            Some(at) => at.format("%b %d, %H:%M").to_string(),
            None => String::from("--"),
        }
    }
}

/// Ordered lap history, held most-recent-first
#[derive(Debug, Clone, Default)]
pub struct LapLedger {
    records: Vec<LapRecord>,
}

impl LapLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from records in chronological (storage) order
    pub fn from_chronological(records: Vec<LapRecord>) -> Self {
        let mut ledger = Self::new();
        ledger.replace_all(records);
        ledger
    }

    /// Put a new record at the head of the display order
    pub fn append(&mut self, record: LapRecord) {
        self.records.insert(0, record);
    }

    /// Replace everything with `records`, given oldest-first
    pub fn replace_all(&mut self, mut records: Vec<LapRecord>) {
        records.reverse();
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// One past the highest lap number held, or 1 when empty
    pub fn next_lap_number(&self) -> u32 {
        self.records
            .iter()
            .map(|r| r.lap_number)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Records most-recent-first
    pub fn display(&self) -> &[LapRecord] {
        &self.records
    }

    /// Records oldest-first, the order they are persisted in
    pub fn to_chronological(&self) -> Vec<LapRecord> {
        self.records.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
