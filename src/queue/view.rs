//! Read-only queue projections
//!
//! What a waiting visitor sees on the status page: a display status
//! derived from the desk's availability and the ticket's state, and the
//! ticket's place in the FCFS line. Everything here is a pure function
//! over already-fetched data.

use crate::core::{StaffStatus, Ticket, TicketId};
use serde::Serialize;

/// Status banner shown on the visitor's status page.
///
/// `class` and `priority` drive the kiosk frontend's styling and refresh
/// cadence and are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayStatus {
    /// Banner text
    pub text: &'static str,
    /// CSS class hint
    pub class: &'static str,
    /// `high` statuses poll faster on the client
    pub priority: &'static str,
}

/// Derive the banner for a ticket given its desk's staff status.
///
/// First match wins: an away desk overrides everything, then a called
/// ticket, then the waiting default.
#[must_use]
pub fn display_status(ticket: &Ticket, staff: StaffStatus) -> DisplayStatus {
    if staff == StaffStatus::Away {
        DisplayStatus {
            text: "Admin Away",
            class: "status-away",
            priority: "low",
        }
    } else if ticket.is_called() {
        DisplayStatus {
            text: "Being called",
            class: "status-called",
            priority: "high",
        }
    } else {
        DisplayStatus {
            text: "Waiting",
            class: "status-waiting",
            priority: "low",
        }
    }
}

/// Zero-based rank of a ticket in an FCFS-ordered open-ticket list.
///
/// Callers report it 1-based to visitors. `None` when the ticket is not
/// in the list (completed, or another department's).
#[must_use]
pub fn position_of(open_tickets: &[Ticket], id: &TicketId) -> Option<usize> {
    open_tickets.iter().position(|t| &t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Department, TicketBuilder, TicketNumber, TicketState};

    fn ticket(id: &str, sequence: u16, state: TicketState) -> Ticket {
        TicketBuilder::new()
            .id(id)
            .number(TicketNumber::new(Department::Dean, sequence).unwrap())
            .state(state)
            .build()
    }

    #[test]
    fn test_waiting_ticket_waits() {
        let status = display_status(
            &ticket("t-1", 1, TicketState::Waiting),
            StaffStatus::Available,
        );
        assert_eq!(status.text, "Waiting");
        assert_eq!(status.class, "status-waiting");
        assert_eq!(status.priority, "low");
    }

    #[test]
    fn test_called_ticket_is_high_priority() {
        let status = display_status(&ticket("t-1", 1, TicketState::Called), StaffStatus::Busy);
        assert_eq!(status.text, "Being called");
        assert_eq!(status.class, "status-called");
        assert_eq!(status.priority, "high");
    }

    #[test]
    fn test_away_overrides_everything() {
        for state in [TicketState::Waiting, TicketState::Called] {
            let status = display_status(&ticket("t-1", 1, state), StaffStatus::Away);
            assert_eq!(status.text, "Admin Away");
            assert_eq!(status.class, "status-away");
            assert_eq!(status.priority, "low");
        }
    }

    #[test]
    fn test_position_is_rank_in_open_list() {
        let open = vec![
            ticket("a", 1, TicketState::Waiting),
            ticket("b", 2, TicketState::Called),
            ticket("c", 3, TicketState::Waiting),
        ];
        assert_eq!(position_of(&open, &"a".into()), Some(0));
        assert_eq!(position_of(&open, &"c".into()), Some(2));
        assert_eq!(position_of(&open, &"missing".into()), None);
    }

    #[test]
    fn test_serialized_banner_field_names() {
        let status = display_status(
            &ticket("t-1", 1, TicketState::Waiting),
            StaffStatus::Available,
        );
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["text"], "Waiting");
        assert_eq!(json["class"], "status-waiting");
        assert_eq!(json["priority"], "low");
    }
}
