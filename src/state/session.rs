//! Session controller
//!
//! Owns the timer and the lap ledger for one app session, persists the ledger
//! through a [`KeyValueStore`] and publishes every timer change to watchers.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::{
    lap_ledger::{LapLedger, LapRecord},
    task::{task_choices, Task},
    timer_state::{PrimaryAction, TimerSnapshot, TimerState},
};
use crate::{
    clock::Clock,
    error::SessionError,
    storage::{
        load_document, load_items, save_items, KeyValueStore, LoadedDocument, LAP_TIMES_KEY,
        TASKS_KEY,
    },
};

/// Notice shown after the lap history is wiped
pub const LAPS_CLEARED_MESSAGE: &str = "Lap times cleared";

pub struct Session {
    timer: Mutex<TimerState>,
    ledger: Mutex<LapLedger>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    /// Cleared on teardown; every command becomes a no-op afterwards
    alive: AtomicBool,
    /// Channel for timer updates
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("timer", &self.timer)
            .field("ledger", &self.ledger)
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session, hydrating the lap ledger from `store`
    pub fn open(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let ledger = match load_document::<LapRecord>(store.as_ref(), LAP_TIMES_KEY) {
            Ok(LoadedDocument { mut items, legacy }) => {
                info!("Loaded {} lap times", items.len());
                if legacy {
                    // Unversioned arrays were saved newest-first
                    items.reverse();
                }
                LapLedger::from_chronological(items)
            }
            Err(e) => {
                warn!("Failed to load lap times, starting empty: {}", e);
                LapLedger::new()
            }
        };

        let timer = TimerState::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());

        Self {
            timer: Mutex::new(timer),
            ledger: Mutex::new(ledger),
            store,
            clock,
            alive: AtomicBool::new(true),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Watch timer snapshots as they change
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerState>, SessionError> {
        self.timer
            .lock()
            .map_err(|_| SessionError::LockPoisoned("timer"))
    }

    fn lock_ledger(&self) -> Result<MutexGuard<'_, LapLedger>, SessionError> {
        self.ledger
            .lock()
            .map_err(|_| SessionError::LockPoisoned("lap ledger"))
    }

    /// Lock the timer, apply `f`, and publish the result if it changed anything
    fn update_timer<F, R>(&self, action: &str, f: F) -> Result<Option<R>, SessionError>
    where
        F: FnOnce(&mut TimerState, i64) -> (bool, R),
    {
        if !self.is_alive() {
            debug!("Ignoring {} after shutdown", action);
            return Ok(None);
        }

        let now = self.clock.now_millis();
        let mut timer = self.lock_timer()?;
        let (changed, result) = f(&mut *timer, now);
        let snapshot = timer.snapshot();
        drop(timer); // Release the lock early

        if changed {
            if let Err(e) = self.snapshot_tx.send(snapshot) {
                warn!("Failed to send timer update: {}", e);
            }
        }
        Ok(Some(result))
    }

    /// The play button: start when stopped, resume when paused
    pub fn primary(&self) -> Result<PrimaryAction, SessionError> {
        let action = self
            .update_timer("primary", |timer, now| {
                let action = timer.primary(now);
                (action != PrimaryAction::Ignored, action)
            })?
            .unwrap_or(PrimaryAction::Ignored);

        match action {
            PrimaryAction::Started => info!("Timer started"),
            PrimaryAction::Resumed => info!("Timer resumed"),
            PrimaryAction::Ignored => debug!("Primary action ignored, timer already running"),
        }
        Ok(action)
    }

    pub fn start(&self) -> Result<bool, SessionError> {
        let applied = self
            .update_timer("start", |timer, now| {
                let applied = timer.start(now);
                (applied, applied)
            })?
            .unwrap_or(false);
        if applied {
            info!("Timer started");
        } else {
            debug!("Start ignored, timer not stopped");
        }
        Ok(applied)
    }

    pub fn pause(&self) -> Result<bool, SessionError> {
        let applied = self
            .update_timer("pause", |timer, _| {
                let applied = timer.pause();
                (applied, applied)
            })?
            .unwrap_or(false);
        if applied {
            info!("Timer paused");
        } else {
            debug!("Pause ignored, timer not running");
        }
        Ok(applied)
    }

    pub fn resume(&self) -> Result<bool, SessionError> {
        let applied = self
            .update_timer("resume", |timer, now| {
                let applied = timer.resume(now);
                (applied, applied)
            })?
            .unwrap_or(false);
        if applied {
            info!("Timer resumed");
        } else {
            debug!("Resume ignored, timer not paused");
        }
        Ok(applied)
    }

    /// Stop and zero the timer. The lap ledger is left untouched.
    pub fn reset(&self) -> Result<(), SessionError> {
        if self
            .update_timer("reset", |timer, _| {
                timer.reset();
                (true, ())
            })?
            .is_some()
        {
            info!("Timer reset");
        }
        Ok(())
    }

    /// Recompute elapsed time; only has an effect while running
    pub fn tick(&self) -> Result<bool, SessionError> {
        let ticked = self
            .update_timer("tick", |timer, now| {
                let ticked = timer.tick(now);
                (ticked, ticked)
            })?
            .unwrap_or(false);
        Ok(ticked)
    }

    /// Relabel the session. Rejected with a user-facing message while running.
    pub fn select_task(&self, label: &str) -> Result<(), SessionError> {
        let outcome = self.update_timer("select task", |timer, _| {
            let result = timer.select_task(label);
            (result.is_ok(), result)
        })?;

        match outcome {
            Some(Ok(())) => {
                info!("Selected task: {}", label);
                Ok(())
            }
            Some(Err(e)) => {
                info!("Task change rejected: {}", e);
                Err(e.into())
            }
            None => Ok(()),
        }
    }

    /// Snapshot the running timer into a new lap and persist the ledger
    pub fn record_lap(&self) -> Result<Option<LapRecord>, SessionError> {
        if !self.is_alive() {
            debug!("Ignoring lap after shutdown");
            return Ok(None);
        }

        let (elapsed, label) = {
            let timer = self.lock_timer()?;
            if !timer.is_running() {
                debug!("Timer not running, lap not added");
                return Ok(None);
            }
            (timer.elapsed_millis(), timer.lap_label())
        };

        let mut ledger = self.lock_ledger()?;
        let now = self.clock.now_millis();
        let record = LapRecord::capture(ledger.next_lap_number(), elapsed, label, now);
        ledger.append(record.clone());
        info!(
            "Lap {} added at {}ms for task: {}",
            record.lap_number, record.elapsed_millis_at_lap, record.task_label
        );
        self.persist_laps(&ledger);
        Ok(Some(record))
    }

    /// Wipe the lap history; numbering restarts at 1
    pub fn clear_laps(&self) -> Result<(), SessionError> {
        if !self.is_alive() {
            debug!("Ignoring clear after shutdown");
            return Ok(());
        }

        let mut ledger = self.lock_ledger()?;
        ledger.clear();
        info!("Lap times cleared");
        self.persist_laps(&ledger);
        Ok(())
    }

    fn persist_laps(&self, ledger: &LapLedger) {
        let records = ledger.to_chronological();
        match save_items(self.store.as_ref(), LAP_TIMES_KEY, &records) {
            Ok(()) => debug!("Saved {} lap times", records.len()),
            Err(e) => error!("Failed to save lap times: {}", e),
        }
    }

    /// Labels for the task selector, read fresh from the task list document
    pub fn task_choices(&self) -> Vec<String> {
        match load_items::<Task>(self.store.as_ref(), TASKS_KEY) {
            Ok(tasks) => task_choices(&tasks),
            Err(e) => {
                warn!("Failed to load tasks, offering placeholders: {}", e);
                task_choices(&[])
            }
        }
    }

    /// Get current timer state
    pub fn snapshot(&self) -> Result<TimerSnapshot, SessionError> {
        Ok(self.lock_timer()?.snapshot())
    }

    /// Laps most-recent-first
    pub fn laps(&self) -> Result<Vec<LapRecord>, SessionError> {
        Ok(self.lock_ledger()?.display().to_vec())
    }

    /// Stop the timer and refuse further commands
    pub fn shutdown(&self) {
        if !self.alive.swap(false, Ordering::SeqCst) {
            return;
        }
        match self.timer.lock() {
            Ok(mut timer) => {
                timer.pause();
                let snapshot = timer.snapshot();
                drop(timer);
                // Wake the tick task so it notices the status change
                if let Err(e) = self.snapshot_tx.send(snapshot) {
                    warn!("Failed to send final timer update: {}", e);
                }
            }
            Err(e) => error!("Failed to lock timer during shutdown: {}", e),
        }
        info!("Session shut down");
    }
}
