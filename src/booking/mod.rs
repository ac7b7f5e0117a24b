//! Booking lifecycle: the versioned reservation store, the polling
//! reconciler that keeps it fresh, and consumer-side order actions.

pub mod orders;
pub mod reconciler;
pub mod store;

pub use orders::{CancelOutcome, MessageCard, OrderManager};
pub use reconciler::{Reconciler, ReconcilerHandle, POLL_INTERVAL};
pub use store::{ReservationSnapshot, ReservationStore, WriteOutcome};
