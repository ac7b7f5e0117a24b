//! Display badges derived from a reservation status.
//!
//! Two call sites project the same status differently: the offer side (what
//! a service provider sees on their own listing) and the order side (what a
//! consumer sees on their booking). They disagree on
//! `CANCELED_BY_SERVICE_PROVIDER` and are kept as two separate mappings.

use super::status::ReservationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Blue,
    Gray,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub color: BadgeColor,
}

const UPCOMING: Badge = Badge { label: "Upcoming", color: BadgeColor::Green };
const IN_PROGRESS: Badge = Badge { label: "In progress", color: BadgeColor::Blue };
const FINISHED: Badge = Badge { label: "Finished", color: BadgeColor::Gray };
const PENDING: Badge = Badge { label: "Pending", color: BadgeColor::Yellow };
const CANCELLED: Badge = Badge { label: "Cancelled", color: BadgeColor::Red };

/// Badge shown on the offer side of a booking.
pub fn offer_badge(status: ReservationStatus) -> Badge {
    match status {
        ReservationStatus::Booked => UPCOMING,
        ReservationStatus::Started | ReservationStatus::MarkedAsStarted => IN_PROGRESS,
        ReservationStatus::Finished => FINISHED,
        ReservationStatus::MarkedAsFinished => PENDING,
        // A provider cancellation is still pending settlement from the
        // provider's point of view.
        ReservationStatus::CanceledByServiceProvider => PENDING,
        ReservationStatus::CanceledByConsumer => CANCELLED,
    }
}

/// Badge shown on the order side of a booking.
pub fn order_badge(status: ReservationStatus) -> Badge {
    match status {
        ReservationStatus::Booked => UPCOMING,
        ReservationStatus::Started | ReservationStatus::MarkedAsStarted => IN_PROGRESS,
        ReservationStatus::Finished => FINISHED,
        ReservationStatus::MarkedAsFinished => PENDING,
        ReservationStatus::CanceledByServiceProvider | ReservationStatus::CanceledByConsumer => {
            CANCELLED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ReservationStatus; 7] = [
        ReservationStatus::Booked,
        ReservationStatus::Started,
        ReservationStatus::MarkedAsStarted,
        ReservationStatus::Finished,
        ReservationStatus::MarkedAsFinished,
        ReservationStatus::CanceledByConsumer,
        ReservationStatus::CanceledByServiceProvider,
    ];

    #[test]
    fn projections_are_pure() {
        for status in ALL {
            assert_eq!(offer_badge(status), offer_badge(status));
            assert_eq!(order_badge(status), order_badge(status));
        }
    }

    #[test]
    fn sides_agree_except_on_provider_cancellation() {
        for status in ALL {
            let offer = offer_badge(status);
            let order = order_badge(status);
            if status == ReservationStatus::CanceledByServiceProvider {
                assert_eq!(offer, Badge { label: "Pending", color: BadgeColor::Yellow });
                assert_eq!(order, Badge { label: "Cancelled", color: BadgeColor::Red });
            } else {
                assert_eq!(offer, order);
            }
        }
    }

    #[test]
    fn order_side_matches_the_table() {
        assert_eq!(order_badge(ReservationStatus::Booked), UPCOMING);
        assert_eq!(order_badge(ReservationStatus::Started), IN_PROGRESS);
        assert_eq!(order_badge(ReservationStatus::MarkedAsStarted), IN_PROGRESS);
        assert_eq!(order_badge(ReservationStatus::Finished), FINISHED);
        assert_eq!(order_badge(ReservationStatus::MarkedAsFinished), PENDING);
        assert_eq!(order_badge(ReservationStatus::CanceledByConsumer), CANCELLED);
    }
}
