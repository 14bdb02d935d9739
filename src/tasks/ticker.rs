//! Periodic refresh of the running timer

use std::{sync::Weak, time::Duration};
use tokio::{sync::watch, time::MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{Session, TimerSnapshot, TimerStatus};

/// Refresh cadence used when none is configured
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Background task that ticks the session while its timer is running.
///
/// Holds only a weak handle: once the session is dropped, or its snapshot
/// channel closes, the task exits without touching it again.
pub async fn tick_task(
    session: Weak<Session>,
    period: Duration,
    mut snapshot_rx: watch::Receiver<TimerSnapshot>,
) {
    info!("Starting tick task ({}ms cadence)", period.as_millis());

    loop {
        // Wait until the timer is running
        let running = snapshot_rx.borrow_and_update().status == TimerStatus::Running;
        if !running {
            if snapshot_rx.changed().await.is_err() {
                debug!("Snapshot channel closed, tick task exiting");
                return;
            }
            continue;
        }

        debug!("Timer running, ticking every {}ms", period.as_millis());
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(session) = session.upgrade() else {
                        debug!("Session dropped, tick task exiting");
                        return;
                    };
                    if !session.is_alive() {
                        debug!("Session shut down, tick task exiting");
                        return;
                    }
                    if let Err(e) = session.tick() {
                        error!("Failed to tick timer: {}", e);
                    }
                }

                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        debug!("Snapshot channel closed, tick task exiting");
                        return;
                    }
                    if snapshot_rx.borrow_and_update().status != TimerStatus::Running {
                        debug!("Timer left running state, ticking stopped");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{clock::ManualClock, storage::MemoryStore};

    fn spawn_session(clock: Arc<ManualClock>) -> (Arc<Session>, tokio::task::JoinHandle<()>) {
        let session = Arc::new(Session::open(Arc::new(MemoryStore::new()), clock));
        let handle = tokio::spawn(tick_task(
            Arc::downgrade(&session),
            DEFAULT_TICK,
            session.subscribe(),
        ));
        (session, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_publish_elapsed_while_running() {
        let clock = Arc::new(ManualClock::new(0));
        let (session, _handle) = spawn_session(clock.clone());

        session.start().unwrap();
        tokio::task::yield_now().await;
        clock.set(1_000);
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(session.snapshot().unwrap().elapsed_millis, 1_000);
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_after_pause() {
        let clock = Arc::new(ManualClock::new(0));
        let (session, _handle) = spawn_session(clock.clone());

        session.start().unwrap();
        clock.set(400);
        tokio::time::sleep(Duration::from_millis(150)).await;
        session.pause().unwrap();
        let frozen = session.snapshot().unwrap().elapsed_millis;

        clock.set(10_000);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(session.snapshot().unwrap().elapsed_millis, frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn no_ticks_after_reset_until_restarted() {
        let clock = Arc::new(ManualClock::new(0));
        let (session, _handle) = spawn_session(clock.clone());

        session.start().unwrap();
        clock.set(700);
        tokio::time::sleep(Duration::from_millis(150)).await;
        session.reset().unwrap();

        clock.set(5_000);
        tokio::time::sleep(Duration::from_millis(500)).await;
        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.status, TimerStatus::Stopped);
        assert_eq!(snapshot.elapsed_millis, 0);

        session.start().unwrap();
        clock.set(5_300);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(session.snapshot().unwrap().elapsed_millis, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn exits_when_session_dropped() {
        let clock = Arc::new(ManualClock::new(0));
        let (session, handle) = spawn_session(clock);

        session.start().unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        drop(session);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("tick task should exit")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stops_ticking_after_shutdown() {
        let clock = Arc::new(ManualClock::new(0));
        let (session, handle) = spawn_session(clock.clone());

        session.start().unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        session.shutdown();
        clock.set(3_000);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(session.snapshot().unwrap().elapsed_millis, 0);
        drop(session);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("tick task should exit")
            .unwrap();
    }
}
