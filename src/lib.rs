//! Reservation and meeting lifecycle core for a chat-embedded marketplace.
//!
//! Offers are advertised in chat, consumers book time slots, and a booked
//! reservation is carried through a live video session to a terminal state:
//! - Versioned reservation store with optimistic-concurrency writes
//! - Polling reconciler against the backend of record
//! - Phase-machine session controller over the vendor video SDK
//! - Pure status badges, countdowns, and chat-message projection

pub mod backend;
pub mod booking;
pub mod chat;
pub mod config;
pub mod countdown;
pub mod error;
pub mod events;
pub mod identity;
pub mod model;
pub mod session;

// Re-exports for convenience
pub use backend::{HttpBackend, ReservationBackend};
pub use booking::{OrderManager, Reconciler, ReservationStore};
pub use events::{EventBus, LifecycleEvent};
pub use model::{ReservationStatus, SessionRole};
pub use session::SessionController;
