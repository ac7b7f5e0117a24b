//! Versioned reservation state container.
//!
//! Two independent writers touch a reservation's status: the reconciler's
//! read-refresh and the session controller's post-leave write. Both funnel
//! through the two `apply_*` entry points here, each carrying the version
//! it observed; a write whose observed version is no longer current is
//! discarded rather than applied over someone else's update. Once a
//! terminal status lands, the record is frozen for good.

use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::events::{EventBus, LifecycleEvent};
use crate::model::reservation::{MeetingCredentials, Reservation};
use crate::model::status::ReservationStatus;

/// A point-in-time copy of the record plus the version that produced it.
#[derive(Debug, Clone)]
pub struct ReservationSnapshot {
    pub reservation: Reservation,
    pub version: u64,
}

/// What happened to a dispatched write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// The record changed since the writer read it; the write was discarded.
    Stale { current_version: u64 },
    /// The record is terminal and immutable.
    Frozen,
}

pub struct ReservationStore {
    state: RwLock<ReservationSnapshot>,
    bus: Arc<EventBus>,
    watch_tx: watch::Sender<ReservationSnapshot>,
}

impl ReservationStore {
    pub fn new(reservation: Reservation, bus: Arc<EventBus>) -> Arc<Self> {
        let snapshot = ReservationSnapshot { reservation, version: 0 };
        let (watch_tx, _) = watch::channel(snapshot.clone());
        Arc::new(Self { state: RwLock::new(snapshot), bus, watch_tx })
    }

    pub async fn snapshot(&self) -> ReservationSnapshot {
        self.state.read().await.clone()
    }

    pub async fn status(&self) -> ReservationStatus {
        self.state.read().await.reservation.status
    }

    /// Valid meeting credentials, present only while joinable.
    pub async fn meeting_credentials(&self) -> Option<MeetingCredentials> {
        self.state.read().await.reservation.meeting_credentials()
    }

    /// Observe every applied write as a fresh snapshot.
    pub fn watch(&self) -> watch::Receiver<ReservationSnapshot> {
        self.watch_tx.subscribe()
    }

    /// Apply a poll result: replace the status if it differs and, when the
    /// backend reports `MARKED_AS_STARTED`, capture the meeting credentials
    /// from the response.
    pub async fn apply_fetch(&self, observed_version: u64, fresh: Reservation) -> WriteOutcome {
        let mut guard = self.state.write().await;
        if guard.reservation.status.is_terminal() {
            return WriteOutcome::Frozen;
        }
        if guard.version != observed_version {
            return WriteOutcome::Stale { current_version: guard.version };
        }

        let id = guard.reservation.id.clone();
        let previous = guard.reservation.status;
        let mut mutated = false;

        if fresh.status != previous {
            guard.reservation.status = fresh.status;
            mutated = true;
            self.bus.publish(LifecycleEvent::StatusChanged {
                reservation_id: id.clone(),
                from: previous,
                to: fresh.status,
            });
        }

        if fresh.status == ReservationStatus::MarkedAsStarted {
            if fresh.meeting_id.is_some()
                && (guard.reservation.meeting_id != fresh.meeting_id
                    || guard.reservation.meeting_password != fresh.meeting_password)
            {
                guard.reservation.meeting_id = fresh.meeting_id;
                guard.reservation.meeting_password = fresh.meeting_password;
                mutated = true;
            }
            if previous != ReservationStatus::MarkedAsStarted {
                self.bus.publish(LifecycleEvent::MeetingReady { reservation_id: id });
            }
        }

        if mutated {
            guard.version += 1;
            let _ = self.watch_tx.send((*guard).clone());
        }
        WriteOutcome::Applied
    }

    /// Apply a locally initiated status change (cancellation, finalization).
    pub async fn apply_status(
        &self,
        observed_version: u64,
        to: ReservationStatus,
    ) -> WriteOutcome {
        let mut guard = self.state.write().await;
        if guard.reservation.status.is_terminal() {
            return WriteOutcome::Frozen;
        }
        if guard.version != observed_version {
            return WriteOutcome::Stale { current_version: guard.version };
        }

        let previous = guard.reservation.status;
        if to != previous {
            guard.reservation.status = to;
            guard.version += 1;
            self.bus.publish(LifecycleEvent::StatusChanged {
                reservation_id: guard.reservation.id.clone(),
                from: previous,
                to,
            });
            let _ = self.watch_tx.send((*guard).clone());
        }
        WriteOutcome::Applied
    }
}
