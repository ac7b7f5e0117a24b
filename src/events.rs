//! Lifecycle event bus.
//!
//! A broadcast pub/sub channel for everything the surrounding UI needs to
//! react to: status transitions, meeting readiness, user-visible
//! notifications, session phase changes. The bus is an owned instance
//! shared by `Arc` — components receive it explicitly, there is no
//! process-wide singleton to mutate from a distance.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::model::status::ReservationStatus;
use crate::session::controller::SessionPhase;

/// Events published while a reservation moves through its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum LifecycleEvent {
    /// The backend reported a different status than the one held locally.
    StatusChanged {
        reservation_id: String,
        from: ReservationStatus,
        to: ReservationStatus,
    },
    /// Meeting credentials became valid; the consumer may join.
    MeetingReady { reservation_id: String },
    /// A cancellation was accepted. `message` is user-visible.
    ReservationCancelled { reservation_id: String, message: String },
    /// A cancellation was refused locally. `message` is user-visible.
    CancellationRejected {
        reservation_id: String,
        status: ReservationStatus,
        message: String,
    },
    /// The session controller moved to a new phase.
    SessionPhaseChanged { reservation_id: String, phase: SessionPhase },
}

pub struct EventBus {
    tx: broadcast::Sender<LifecycleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    /// Publish an event to all subscribers. Dropped silently when nobody
    /// is listening.
    pub fn publish(&self, event: LifecycleEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
