//! Reservation and time-slot wire models.

use serde::{Deserialize, Serialize};

use super::status::ReservationStatus;

/// A consumer's booking of a time slot against an offer.
///
/// Created by the booking flow (out of scope here) in `BOOKED` state and
/// mutated only through the store's update entry points afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub offer_id: String,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    #[serde(rename = "time_slot", default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
}

impl Reservation {
    /// Meeting credentials, valid only once the provider has marked the
    /// slot started. Before that any `meetingId` on the record is stale
    /// and must not be used to join.
    pub fn meeting_credentials(&self) -> Option<MeetingCredentials> {
        if self.status != ReservationStatus::MarkedAsStarted {
            return None;
        }
        match (&self.meeting_id, &self.meeting_password) {
            (Some(id), Some(password)) => Some(MeetingCredentials {
                meeting_id: id.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// The id a provider-side finalization PUT is addressed to: the linked
    /// time slot when present, the reservation itself otherwise.
    pub fn time_table_ref(&self) -> &str {
        self.time_slot.as_ref().map(|slot| slot.id.as_str()).unwrap_or(&self.id)
    }
}

/// A bookable interval under an offer.
///
/// `form_time` is the backend's actual (misspelled) field name for the
/// start timestamp; both timestamps arrive as epoch strings in either
/// seconds or milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    #[serde(default)]
    pub offer_id: String,
    #[serde(rename = "form_time")]
    pub starts_at: String,
    #[serde(rename = "to_time")]
    pub ends_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_password: Option<String>,
}

/// Credentials needed to enter a live meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingCredentials {
    pub meeting_id: String,
    pub password: String,
}
