//! Consumer-side order actions: cancelling a booking and resolving a chat
//! message into the card it should render.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::backend::ReservationBackend;
use crate::booking::store::{ReservationStore, WriteOutcome};
use crate::chat::{parse_message, MeetingAnnouncement, MessagePointer};
use crate::error::BackendError;
use crate::events::{EventBus, LifecycleEvent};
use crate::identity::ConsumerIdentity;
use crate::model::offer::Offer;
use crate::model::reservation::Reservation;
use crate::model::status::{ReservationStatus, StatusChange};

/// How a chat message renders once resolved against the backend.
#[derive(Debug)]
pub enum MessageCard {
    Offer {
        offer: Offer,
        expired: bool,
    },
    Reservation {
        reservation: Reservation,
        offer: Option<Offer>,
        announcement: MeetingAnnouncement,
        /// Joining is only allowed once the provider marked the slot started.
        can_join: bool,
    },
    /// Nothing resolvable; render the message text as-is.
    Raw { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// Refused locally; no backend call was made. `message` is user-visible.
    Rejected {
        status: ReservationStatus,
        message: String,
    },
}

pub struct OrderManager {
    backend: Arc<dyn ReservationBackend>,
    bus: Arc<EventBus>,
}

impl OrderManager {
    pub fn new(backend: Arc<dyn ReservationBackend>, bus: Arc<EventBus>) -> Self {
        Self { backend, bus }
    }

    /// Cancel a booked order. Permitted only from `BOOKED`; any other state
    /// yields a user-visible rejection and no backend call.
    pub async fn cancel(&self, store: &ReservationStore) -> Result<CancelOutcome, BackendError> {
        let snapshot = store.snapshot().await;
        let id = snapshot.reservation.id.clone();
        let status = snapshot.reservation.status;

        if status != ReservationStatus::Booked {
            let message =
                format!("Sorry, we are not able to cancel while the order is in {status} state");
            self.bus.publish(LifecycleEvent::CancellationRejected {
                reservation_id: id,
                status,
                message: message.clone(),
            });
            return Ok(CancelOutcome::Rejected { status, message });
        }

        self.backend.update_reservation_status(&id, StatusChange::Canceled).await?;

        let outcome = store
            .apply_status(snapshot.version, ReservationStatus::CanceledByConsumer)
            .await;
        if outcome != WriteOutcome::Applied {
            debug!("reservation {id}: local cancel write discarded ({outcome:?})");
        }

        self.bus.publish(LifecycleEvent::ReservationCancelled {
            reservation_id: id,
            message: "Your order has been cancelled".to_string(),
        });
        Ok(CancelOutcome::Cancelled)
    }

    /// Resolve a chat message into its display card. Failed or empty
    /// lookups degrade to the raw text — resolution never errors out.
    pub async fn resolve_card(
        &self,
        text: &str,
        identity: &ConsumerIdentity,
        now: DateTime<Utc>,
    ) -> MessageCard {
        match parse_message(text) {
            MessagePointer::Offer { offer_id } => {
                match self.backend.fetch_offer(&offer_id).await {
                    Ok(offer) => {
                        let expired = offer.is_expired(now);
                        MessageCard::Offer { offer, expired }
                    }
                    Err(e) => {
                        warn!("offer {offer_id}: lookup failed, rendering raw text: {e}");
                        raw(text)
                    }
                }
            }
            MessagePointer::Meeting(announcement) => {
                if !identity.is_registered() {
                    return raw(text);
                }
                let found = self
                    .backend
                    .find_reservation_by_time_slot(
                        &announcement.time_slot_id,
                        &identity.consumer_id,
                    )
                    .await;
                match found {
                    Ok(Some(reservation)) => {
                        let offer = match self.backend.fetch_offer(&reservation.offer_id).await {
                            Ok(offer) => Some(offer),
                            Err(e) => {
                                warn!(
                                    "offer {}: lookup failed for reservation card: {e}",
                                    reservation.offer_id
                                );
                                None
                            }
                        };
                        let can_join = reservation.status == ReservationStatus::MarkedAsStarted;
                        MessageCard::Reservation { reservation, offer, announcement, can_join }
                    }
                    Ok(None) => raw(text),
                    Err(e) => {
                        warn!(
                            "time slot {}: reservation lookup failed, rendering raw text: {e}",
                            announcement.time_slot_id
                        );
                        raw(text)
                    }
                }
            }
            MessagePointer::Raw => raw(text),
        }
    }
}

fn raw(text: &str) -> MessageCard {
    MessageCard::Raw { text: text.to_string() }
}
