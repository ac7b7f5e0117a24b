//! Reservation status vocabulary and session roles.
//!
//! The backend is the authority on status values: whatever it returns is
//! accepted as-is, with no in-process transition validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a reservation, as reported by the backend of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Booked,
    Started,
    MarkedAsStarted,
    Finished,
    MarkedAsFinished,
    CanceledByConsumer,
    CanceledByServiceProvider,
}

impl ReservationStatus {
    /// Terminal statuses end the reservation's lifecycle: the record is
    /// frozen and polling stops permanently.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Finished
                | ReservationStatus::MarkedAsFinished
                | ReservationStatus::CanceledByConsumer
                | ReservationStatus::CanceledByServiceProvider
        )
    }

    /// Non-terminal statuses are actively reconciled against the backend.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Wire name, e.g. `MARKED_AS_STARTED`.
    pub fn as_wire(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => "BOOKED",
            ReservationStatus::Started => "STARTED",
            ReservationStatus::MarkedAsStarted => "MARKED_AS_STARTED",
            ReservationStatus::Finished => "FINISHED",
            ReservationStatus::MarkedAsFinished => "MARKED_AS_FINISHED",
            ReservationStatus::CanceledByConsumer => "CANCELED_BY_CONSUMER",
            ReservationStatus::CanceledByServiceProvider => "CANCELED_BY_SERVICE_PROVIDER",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Status values a client is allowed to write back via a PUT.
///
/// The write vocabulary is narrower than the read vocabulary: a consumer
/// cancellation goes out as a plain `CANCELED` and the backend records it
/// as `CANCELED_BY_CONSUMER` on the read side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusChange {
    Finished,
    MarkedAsFinished,
    Canceled,
}

/// Which side of a meeting the local user is on.
///
/// The role carries its finalization endpoint and target status as data so
/// the decision is made once, not re-branched at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionRole {
    Consumer,
    ServiceProvider,
}

/// Endpoint family a finalization PUT is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeEndpoint {
    /// `PUT /reservation/{id}`
    Reservation,
    /// `PUT /time-table/{id}`
    TimeTable,
}

/// The single status-changing request a role issues after a confirmed leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finalization {
    pub endpoint: FinalizeEndpoint,
    pub change: StatusChange,
    /// The status the local record lands on once the write is accepted.
    pub resulting_status: ReservationStatus,
}

impl SessionRole {
    pub fn finalization(&self) -> Finalization {
        match self {
            SessionRole::Consumer => Finalization {
                endpoint: FinalizeEndpoint::Reservation,
                change: StatusChange::Finished,
                resulting_status: ReservationStatus::Finished,
            },
            SessionRole::ServiceProvider => Finalization {
                endpoint: FinalizeEndpoint::TimeTable,
                change: StatusChange::MarkedAsFinished,
                resulting_status: ReservationStatus::MarkedAsFinished,
            },
        }
    }
}
