//! Offer wire model. Read-only from this crate's perspective: listings are
//! created and priced elsewhere, we only display and book against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::epoch_millis;

/// A bookable service listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: OfferCategory,
    pub pricing: Pricing,
    #[serde(rename = "meeting_type", default)]
    pub meeting_type: MeetingType,
    /// Epoch timestamp (seconds or milliseconds) after which the offer can
    /// no longer be booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCategory {
    pub main_cat: String,
    #[serde(default)]
    pub sub_cat: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pricing {
    pub price: f64,
    pub currency: String,
}

/// How a booked session is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingType {
    #[default]
    Default,
    Online,
}

impl Offer {
    /// An offer with no parseable expiration never expires.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiration.as_deref().and_then(epoch_millis) {
            Some(expires_at) => expires_at <= now.timestamp_millis(),
            None => false,
        }
    }
}
