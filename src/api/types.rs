//! Wire types for the HTTP surface
//!
//! Request bodies mirror what the deployed kiosk and admin dashboard
//! send (staff action bodies use camelCase actor keys); response shapes
//! keep the field names those clients already parse. Conversions from
//! the domain [`Ticket`] happen here so handlers never format dates or
//! derive flags themselves.

use crate::core::{Ticket, TicketState};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A ticket as the visitor-facing pages receive it.
#[derive(Debug, Clone, Serialize)]
pub struct TicketView {
    /// Client-chosen id (or the server-generated UUID)
    pub id: String,
    /// Formatted code, e.g. `B012`
    pub number: String,
    /// Destination label printed on the ticket
    pub person: String,
    /// Service day, `%Y-%m-%d`
    pub date: String,
    /// Creation time in the reporting timezone, `%I:%M %p`
    pub time: String,
    /// Lifecycle state
    pub status: TicketState,
    /// Visitor has tapped "I'm here"
    pub is_present: bool,
    /// Audio alerts suppressed
    pub is_muted: bool,
    /// Staff has taken the ticket (stays true after completion)
    pub called: bool,
    /// Ticket reached its terminal state
    pub completed: bool,
}

impl TicketView {
    /// Project a stored ticket into the visitor wire shape.
    #[must_use]
    pub fn new(ticket: &Ticket, offset: FixedOffset) -> Self {
        Self {
            id: ticket.id.to_string(),
            number: ticket.number.to_string(),
            person: ticket.person.clone(),
            date: ticket.date_string(),
            time: ticket.time_string(offset),
            status: ticket.state,
            is_present: ticket.is_present,
            is_muted: ticket.is_muted,
            called: ticket.was_taken(),
            completed: ticket.is_completed(),
        }
    }
}

/// One row of the staff dashboard's full FCFS board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardEntry {
    pub id: String,
    pub number: String,
    pub person: String,
    pub date: String,
    pub time: String,
    pub status: TicketState,
    /// FCFS ordering key
    pub created_at: DateTime<Utc>,
    pub is_present: bool,
    pub present_at: Option<DateTime<Utc>>,
    pub is_muted: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// Completion time in the reporting timezone, `%I:%M %p`
    pub completed_time: Option<String>,
}

impl BoardEntry {
    /// Project a stored ticket into the staff board shape.
    #[must_use]
    pub fn new(ticket: &Ticket, offset: FixedOffset) -> Self {
        Self {
            id: ticket.id.to_string(),
            number: ticket.number.to_string(),
            person: ticket.person.clone(),
            date: ticket.date_string(),
            time: ticket.time_string(offset),
            status: ticket.state,
            created_at: ticket.created_at,
            is_present: ticket.is_present,
            present_at: ticket.present_at,
            is_muted: ticket.is_muted,
            completed_at: ticket.completed_at,
            completed_time: ticket.completed_time_string(offset),
        }
    }
}

/// One line of the staff dashboard's recent-completions feed.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub number: String,
    pub person: String,
    /// `%Y-%m-%d %H:%M` in the reporting timezone
    #[serde(rename = "completedAt")]
    pub completed_at: Option<String>,
}

impl ActivityEntry {
    /// Project a completed ticket into the feed shape.
    #[must_use]
    pub fn new(ticket: &Ticket, offset: FixedOffset) -> Self {
        Self {
            number: ticket.number.to_string(),
            person: ticket.person.clone(),
            completed_at: ticket
                .completed_at
                .map(|at| at.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

/// Body of `POST /queue`.
///
/// `department` stays a string so an unknown slug maps to the 404 the
/// kiosk expects rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct TakeNumberRequest {
    /// Kiosk-generated id; the server fills in a UUID when omitted
    #[serde(default)]
    pub id: Option<String>,
    /// Department slug or prefix letter
    pub department: String,
    /// Optional destination label
    #[serde(default)]
    pub person: Option<String>,
}

/// Body of `POST /admin/call-queue/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallRequest {
    #[serde(rename = "calledBy")]
    pub called_by: Option<String>,
}

/// Body of `POST /admin/return-queue/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnRequest {
    #[serde(rename = "returnedBy")]
    pub returned_by: Option<String>,
}

/// Body of `POST /admin/complete-queue/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteRequest {
    #[serde(rename = "completedBy")]
    pub completed_by: Option<String>,
}

/// Body of `POST /admin/mute-queue/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MuteRequest {
    #[serde(rename = "mutedBy")]
    pub muted_by: Option<String>,
}

/// Body of `POST /admin/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    /// Department slug or prefix letter
    pub department: String,
    /// One of `available`, `busy`, `away`
    pub status: String,
}

/// Body of `POST /admin/delete-all-queues`.
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeRequest {
    /// Must be the dean's desk
    pub department: String,
    /// Must match the fixed confirmation phrase
    pub confirmation: String,
}

/// Body of `POST /emergency-audio`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertRequest {
    /// Number announced to the player; `Unknown` when omitted
    #[serde(default)]
    pub queue_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Department, TicketAction, TicketId, TicketNumber, apply};
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    fn ticket() -> Ticket {
        Ticket::new(
            TicketId::from("kiosk-9"),
            TicketNumber::new(Department::IeChair, 12).unwrap(),
            "IE Chairperson",
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            "2025-09-01T01:15:00Z".parse().unwrap(),
        )
    }

    fn manila() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn test_ticket_view_field_names() {
        let view = TicketView::new(&ticket(), manila());
        let value = serde_json::to_value(&view).unwrap();
        let Value::Object(map) = value else {
            panic!("expected object");
        };
        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "called",
                "completed",
                "date",
                "id",
                "is_muted",
                "is_present",
                "number",
                "person",
                "status",
                "time",
            ]
        );
        assert_eq!(map["number"], "B012");
        assert_eq!(map["date"], "2025-09-01");
        assert_eq!(map["time"], "09:15 AM");
        assert_eq!(map["status"], "waiting");
        assert_eq!(map["called"], false);
    }

    #[test]
    fn test_completed_ticket_view_keeps_called_true() {
        let done = apply(
            &ticket(),
            &TicketAction::Complete {
                by: "ie-desk".to_string(),
            },
            "2025-09-01T02:30:00Z".parse().unwrap(),
        )
        .unwrap();
        let view = TicketView::new(&done, manila());
        assert!(view.called);
        assert!(view.completed);
        assert_eq!(view.status, TicketState::Completed);
    }

    #[test]
    fn test_board_entry_formats_completion_time() {
        let done = apply(
            &ticket(),
            &TicketAction::Complete {
                by: "ie-desk".to_string(),
            },
            "2025-09-01T02:30:00Z".parse().unwrap(),
        )
        .unwrap();
        let entry = BoardEntry::new(&done, manila());
        assert_eq!(entry.completed_time.as_deref(), Some("10:30 AM"));
        assert_eq!(entry.status, TicketState::Completed);
        assert!(entry.completed_at.is_some());
    }

    #[test]
    fn test_activity_entry_uses_camel_case_stamp() {
        let done = apply(
            &ticket(),
            &TicketAction::Complete {
                by: "ie-desk".to_string(),
            },
            "2025-09-01T02:30:00Z".parse().unwrap(),
        )
        .unwrap();
        let value = serde_json::to_value(ActivityEntry::new(&done, manila())).unwrap();
        assert_eq!(value["completedAt"], "2025-09-01 10:30");
        assert!(value.get("completed_at").is_none());
    }

    #[test]
    fn test_action_bodies_accept_camel_case_and_empty() {
        let call: CallRequest = serde_json::from_value(json!({"calledBy": "dean-desk"})).unwrap();
        assert_eq!(call.called_by.as_deref(), Some("dean-desk"));
        let call: CallRequest = serde_json::from_value(json!({})).unwrap();
        assert!(call.called_by.is_none());

        let mute: MuteRequest = serde_json::from_value(json!({"mutedBy": "x"})).unwrap();
        assert_eq!(mute.muted_by.as_deref(), Some("x"));
    }
}
