//! Reservation reconciler.
//!
//! Keeps a displayed reservation synchronized with the backend of record by
//! refetching it on a fixed cadence while the status is non-terminal. The
//! schedule is cancelled exactly once: either the record goes terminal and
//! the loop stops itself, or the owning view goes away and dropping the
//! handle aborts the task. A failed fetch is logged and the state keeps its
//! last-known-good value until the next tick.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

use crate::backend::ReservationBackend;
use crate::booking::store::{ReservationStore, WriteOutcome};

/// Fixed polling cadence.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct Reconciler {
    backend: Arc<dyn ReservationBackend>,
    store: Arc<ReservationStore>,
}

impl Reconciler {
    pub fn new(backend: Arc<dyn ReservationBackend>, store: Arc<ReservationStore>) -> Self {
        Self { backend, store }
    }

    /// Start polling. The returned handle owns the schedule: dropping it
    /// tears the task down.
    pub fn spawn(self) -> ReconcilerHandle {
        ReconcilerHandle { task: tokio::spawn(self.run()) }
    }

    async fn run(self) {
        let reservation_id = self.store.snapshot().await.reservation.id;
        let mut ticker = interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // An interval's first tick fires immediately; the first refetch
        // belongs one full period after spawn.
        ticker.tick().await;

        loop {
            if self.store.status().await.is_terminal() {
                break;
            }
            ticker.tick().await;

            let snapshot = self.store.snapshot().await;
            if snapshot.reservation.status.is_terminal() {
                break;
            }

            match self.backend.fetch_reservation(&snapshot.reservation.id).await {
                Ok(fresh) => match self.store.apply_fetch(snapshot.version, fresh).await {
                    WriteOutcome::Applied => {}
                    WriteOutcome::Stale { current_version } => {
                        debug!(
                            "reservation {reservation_id}: poll result discarded \
                             (observed v{}, current v{current_version})",
                            snapshot.version
                        );
                    }
                    WriteOutcome::Frozen => break,
                },
                Err(e) => {
                    warn!("reservation {reservation_id}: poll failed, keeping last known state: {e}");
                }
            }
        }

        debug!("reservation {reservation_id}: reconciliation stopped");
    }
}

/// Owner of a running polling schedule.
pub struct ReconcilerHandle {
    task: JoinHandle<()>,
}

impl ReconcilerHandle {
    /// True once the schedule has stopped on its own (terminal status).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the schedule. Idempotent with the terminal-status stop.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for ReconcilerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::error::BackendError;
    use crate::events::EventBus;
    use crate::model::offer::Offer;
    use crate::model::reservation::Reservation;
    use crate::model::status::{ReservationStatus, StatusChange};

    fn reservation(status: ReservationStatus) -> Reservation {
        Reservation {
            id: "res-1".into(),
            offer_id: "offer-1".into(),
            status,
            meeting_id: None,
            meeting_password: None,
            trade_id: None,
            time_slot: None,
        }
    }

    /// Replays a scripted status sequence, repeating the last entry.
    struct ScriptedBackend {
        script: Mutex<VecDeque<Result<ReservationStatus, ()>>>,
        last: Mutex<ReservationStatus>,
        fetches: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<ReservationStatus, ()>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                last: Mutex::new(ReservationStatus::Booked),
                fetches: AtomicUsize::new(0),
            })
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReservationBackend for ScriptedBackend {
        async fn fetch_reservation(&self, _id: &str) -> Result<Reservation, BackendError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Ok(status)) => {
                    *self.last.lock().unwrap() = status;
                    Ok(reservation(status))
                }
                Some(Err(())) => Err(BackendError::Status {
                    status: 503,
                    url: "scripted".into(),
                }),
                None => Ok(reservation(*self.last.lock().unwrap())),
            }
        }

        async fn find_reservation_by_time_slot(
            &self,
            _time_slot_id: &str,
            _consumer_id: &str,
        ) -> Result<Option<Reservation>, BackendError> {
            Ok(None)
        }

        async fn update_reservation_status(
            &self,
            _id: &str,
            _change: StatusChange,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        async fn update_time_table_status(
            &self,
            _id: &str,
            _change: StatusChange,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        async fn fetch_offer(&self, _id: &str) -> Result<Offer, BackendError> {
            Err(BackendError::Status { status: 404, url: "scripted".into() })
        }
    }

    async fn advance_one_tick() {
        // Let a freshly spawned poller register its timer before advancing.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        tokio::time::advance(POLL_INTERVAL).await;
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polls_until_terminal_then_stops_for_good() {
        let backend = ScriptedBackend::new(vec![
            Ok(ReservationStatus::Started),
            Ok(ReservationStatus::MarkedAsStarted),
            Ok(ReservationStatus::Finished),
        ]);
        let store = ReservationStore::new(reservation(ReservationStatus::Booked), Arc::new(EventBus::new()));
        let handle = Reconciler::new(backend.clone(), store.clone()).spawn();

        advance_one_tick().await;
        assert_eq!(backend.fetch_count(), 1);
        assert_eq!(store.status().await, ReservationStatus::Started);

        advance_one_tick().await;
        assert_eq!(backend.fetch_count(), 2);
        assert_eq!(store.status().await, ReservationStatus::MarkedAsStarted);

        advance_one_tick().await;
        assert_eq!(backend.fetch_count(), 3);
        assert_eq!(store.status().await, ReservationStatus::Finished);

        // Terminal: the schedule is gone, no matter how much time passes.
        for _ in 0..4 {
            advance_one_tick().await;
        }
        assert_eq!(backend.fetch_count(), 3);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_schedule() {
        let backend = ScriptedBackend::new(vec![]);
        let store = ReservationStore::new(reservation(ReservationStatus::Booked), Arc::new(EventBus::new()));
        let handle = Reconciler::new(backend.clone(), store.clone()).spawn();

        advance_one_tick().await;
        let fetched = backend.fetch_count();
        assert!(fetched >= 1);

        drop(handle);
        for _ in 0..4 {
            advance_one_tick().await;
        }
        assert_eq!(backend.fetch_count(), fetched);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_errors_keep_last_known_good_state() {
        let backend = ScriptedBackend::new(vec![Err(()), Err(())]);
        let store = ReservationStore::new(reservation(ReservationStatus::Booked), Arc::new(EventBus::new()));
        let _handle = Reconciler::new(backend.clone(), store.clone()).spawn();

        advance_one_tick().await;
        advance_one_tick().await;
        assert_eq!(backend.fetch_count(), 2);
        assert_eq!(store.status().await, ReservationStatus::Booked);
    }

    #[tokio::test(start_paused = true)]
    async fn no_fetch_is_issued_for_an_already_terminal_reservation() {
        let backend = ScriptedBackend::new(vec![]);
        let store = ReservationStore::new(
            reservation(ReservationStatus::CanceledByConsumer),
            Arc::new(EventBus::new()),
        );
        let handle = Reconciler::new(backend.clone(), store.clone()).spawn();

        for _ in 0..3 {
            advance_one_tick().await;
        }
        assert_eq!(backend.fetch_count(), 0);
        assert!(handle.is_finished());
    }
}
