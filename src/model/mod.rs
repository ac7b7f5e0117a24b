//! Data model: status vocabulary, wire records, and display projections.

pub mod badge;
pub mod offer;
pub mod reservation;
pub mod status;

pub use badge::{offer_badge, order_badge, Badge, BadgeColor};
pub use offer::{MeetingType, Offer, OfferCategory, Pricing};
pub use reservation::{MeetingCredentials, Reservation, TimeSlot};
pub use status::{Finalization, FinalizeEndpoint, ReservationStatus, SessionRole, StatusChange};
