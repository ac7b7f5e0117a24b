//! The backend-of-record seam.
//!
//! Everything this crate knows about a reservation ultimately comes from
//! (or goes to) these five operations. The trait exists so the polling and
//! session layers can be exercised against in-memory doubles.

pub mod http;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::BackendError;
use crate::model::offer::Offer;
use crate::model::reservation::Reservation;
use crate::model::status::StatusChange;

pub use http::HttpBackend;

/// Payloads arrive wrapped in a `{ "data": ... }` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[async_trait]
pub trait ReservationBackend: Send + Sync {
    /// `GET /reservation/{id}` — current reservation detail.
    async fn fetch_reservation(&self, id: &str) -> Result<Reservation, BackendError>;

    /// `GET /reservation/find-by-tsid?timeSlotId=&consumerId=` — the
    /// consumer's reservation on a time slot, if any. The backend returns a
    /// list; the first entry wins.
    async fn find_reservation_by_time_slot(
        &self,
        time_slot_id: &str,
        consumer_id: &str,
    ) -> Result<Option<Reservation>, BackendError>;

    /// `PUT /reservation/{id}` with `{ "status": ... }`.
    async fn update_reservation_status(
        &self,
        id: &str,
        change: StatusChange,
    ) -> Result<(), BackendError>;

    /// `PUT /time-table/{id}` with `{ "status": ... }` — provider-side
    /// finalization.
    async fn update_time_table_status(
        &self,
        id: &str,
        change: StatusChange,
    ) -> Result<(), BackendError>;

    /// `GET /offer/{id}` — offer detail.
    async fn fetch_offer(&self, id: &str) -> Result<Offer, BackendError>;
}
