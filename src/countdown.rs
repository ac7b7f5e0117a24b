//! Time-to-start calculation for booked slots.
//!
//! Backend timestamps arrive as epoch values in either seconds or
//! milliseconds; anything that fits in ten digits is seconds. All math is
//! truncating, components are always non-negative, and `now` is an input so
//! callers (and tests) control the clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_EPOCH_MAX: i64 = 9_999_999_999;

/// Normalize an epoch value to milliseconds. Ten digits or fewer means the
/// value is in seconds.
pub fn normalize_epoch(value: i64) -> i64 {
    if value.abs() <= SECONDS_EPOCH_MAX {
        value.saturating_mul(1000)
    } else {
        value
    }
}

/// Parse a wire timestamp (an epoch string) into milliseconds.
pub fn epoch_millis(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().map(normalize_epoch)
}

/// Whole-unit countdown to a start time. Seconds are truncated away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeToStart {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

/// Result of comparing a start time against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Pending(TimeToStart),
    AlreadyStarted,
}

impl Countdown {
    pub fn already_started(&self) -> bool {
        matches!(self, Countdown::AlreadyStarted)
    }

    /// The countdown to display: zeroed once the start time has passed.
    pub fn time_to_start(&self) -> TimeToStart {
        match self {
            Countdown::Pending(t) => *t,
            Countdown::AlreadyStarted => TimeToStart::default(),
        }
    }
}

/// Countdown from `now` to `target_epoch` (seconds or milliseconds).
pub fn countdown(target_epoch: i64, now: DateTime<Utc>) -> Countdown {
    let target_ms = normalize_epoch(target_epoch);
    let now_ms = now.timestamp_millis();
    if target_ms <= now_ms {
        return Countdown::AlreadyStarted;
    }

    let mut delta = ((target_ms - now_ms) / 1000) as u64;
    let days = delta / 86_400;
    delta -= days * 86_400;
    let hours = (delta / 3_600) % 24;
    delta -= hours * 3_600;
    let minutes = (delta / 60) % 60;

    Countdown::Pending(TimeToStart { days, hours, minutes })
}

/// Countdown from `now` to a wire timestamp. `None` when the value does not
/// parse at all.
pub fn countdown_from_wire(raw: &str, now: DateTime<Utc>) -> Option<Countdown> {
    epoch_millis(raw).map(|ms| countdown(ms, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn decomposes_whole_units() {
        // 90061 s = 1 day + 1 hour + 1 minute + 1 second; the second truncates.
        let now = at(1_700_000_000);
        let target_ms = now.timestamp_millis() + 90_061_000;
        assert_eq!(
            countdown(target_ms, now),
            Countdown::Pending(TimeToStart { days: 1, hours: 1, minutes: 1 })
        );
    }

    #[test]
    fn past_or_present_target_is_already_started() {
        let now = at(1_700_000_000);
        assert!(countdown(now.timestamp_millis(), now).already_started());
        assert!(countdown(1_600_000_000, now).already_started());
        assert_eq!(
            countdown(1_600_000_000, now).time_to_start(),
            TimeToStart::default()
        );
    }

    #[test]
    fn seconds_and_milliseconds_inputs_agree() {
        let now = at(1_700_000_000);
        let seconds_input = countdown(1_700_090_061, now);
        let millis_input = countdown(1_700_090_061_000, now);
        assert_eq!(seconds_input, millis_input);
        assert_eq!(
            seconds_input,
            Countdown::Pending(TimeToStart { days: 1, hours: 1, minutes: 1 })
        );
    }

    #[test]
    fn wire_strings_normalize_and_parse() {
        let now = at(1_700_000_000);
        assert_eq!(
            countdown_from_wire("1700090061", now),
            Some(Countdown::Pending(TimeToStart { days: 1, hours: 1, minutes: 1 }))
        );
        assert_eq!(countdown_from_wire("  1700090061000 ", now), countdown_from_wire("1700090061", now));
        assert_eq!(countdown_from_wire("soon", now), None);
    }

    #[test]
    fn minutes_truncate_below_the_hour() {
        let now = at(1_700_000_000);
        let target_ms = now.timestamp_millis() + 59_000;
        assert_eq!(
            countdown(target_ms, now),
            Countdown::Pending(TimeToStart { days: 0, hours: 0, minutes: 0 })
        );
    }
}
