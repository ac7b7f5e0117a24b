//! Chat message projection.
//!
//! Offers and meeting announcements travel through chat as plain text. A
//! message either carries a meeting announcement (a `/`-separated payload
//! behind a marker phrase), an offer link, or nothing we recognize — in
//! which case the caller renders the raw text instead of a structured card.

use regex::Regex;

/// Phrase that tags a message as a meeting announcement.
pub const MEETING_MARKER: &str = "Rendezvous meeting";

/// Offer links look like `.../offer/<id>?...` with a lowercase-hex-and-dash id.
const OFFER_LINK_PATTERN: &str = r"offer/([0-9a-f-]+)\?";

/// Structured payload of a meeting announcement:
/// `<marker>/<title>/<meeting id>/<password>/<time slot id>/<sender id>/<display name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingAnnouncement {
    pub title: String,
    pub meeting_id: String,
    pub password: String,
    pub time_slot_id: String,
    pub sender_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePointer {
    Meeting(MeetingAnnouncement),
    Offer { offer_id: String },
    /// Nothing structured recognized; render the text as-is.
    Raw,
}

pub fn parse_message(text: &str) -> MessagePointer {
    if text.contains(MEETING_MARKER) {
        return parse_announcement(text);
    }

    if let Ok(re) = Regex::new(OFFER_LINK_PATTERN) {
        if let Some(id) = re.captures(text).and_then(|caps| caps.get(1)) {
            return MessagePointer::Offer { offer_id: id.as_str().to_string() };
        }
    }

    MessagePointer::Raw
}

fn parse_announcement(text: &str) -> MessagePointer {
    let parts: Vec<&str> = text.split('/').collect();
    // A payload without a time slot id cannot be resolved to a reservation.
    if parts.len() < 7 || parts[4].is_empty() {
        return MessagePointer::Raw;
    }
    MessagePointer::Meeting(MeetingAnnouncement {
        title: parts[1].to_string(),
        meeting_id: parts[2].to_string(),
        password: parts[3].to_string(),
        time_slot_id: parts[4].to_string(),
        sender_id: parts[5].to_string(),
        display_name: parts[6].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_meeting_announcements() {
        let text = "Rendezvous meeting/Morning yoga/840123/s3cret/ts-42/7001/Ada";
        match parse_message(text) {
            MessagePointer::Meeting(a) => {
                assert_eq!(a.title, "Morning yoga");
                assert_eq!(a.meeting_id, "840123");
                assert_eq!(a.password, "s3cret");
                assert_eq!(a.time_slot_id, "ts-42");
                assert_eq!(a.sender_id, "7001");
                assert_eq!(a.display_name, "Ada");
            }
            other => panic!("expected a meeting announcement, got {other:?}"),
        }
    }

    #[test]
    fn announcement_without_a_time_slot_degrades_to_raw() {
        assert_eq!(
            parse_message("Rendezvous meeting/Morning yoga/840123/s3cret//7001/Ada"),
            MessagePointer::Raw
        );
        assert_eq!(parse_message("Rendezvous meeting/too/short"), MessagePointer::Raw);
    }

    #[test]
    fn parses_offer_links() {
        let text = "check this out https://app.example.com/offer/5f3a-77b2?ref=chat";
        assert_eq!(
            parse_message(text),
            MessagePointer::Offer { offer_id: "5f3a-77b2".into() }
        );
    }

    #[test]
    fn plain_text_is_raw() {
        assert_eq!(parse_message("see you tomorrow!"), MessagePointer::Raw);
    }
}
