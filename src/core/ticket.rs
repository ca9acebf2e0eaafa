//! Ticket model for the queue service
//!
//! A [`Ticket`] is one visitor's place in a department queue: an opaque
//! [`TicketId`] chosen by the kiosk client (or generated server-side), the
//! visitor-facing [`TicketNumber`] such as `A007`, the lifecycle state, the
//! presence/mute flags, and the provenance stamps recorded by each staff
//! action. Mutation happens only through the lifecycle rules in
//! [`crate::core::lifecycle`]; nothing here writes state directly.

use super::{Department, TicketState};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque unique identifier for a ticket, supplied by the client.
///
/// The kiosk frontends generate their own ids; when a client omits one the
/// server fills in a UUID v4. Ordering is plain string order and is used
/// only to break `created_at` ties in FCFS listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Generate a fresh server-side id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// View the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TicketId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TicketId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Visitor-facing ticket code: department prefix plus a 3-digit sequence.
///
/// Serialized as the formatted code (`"A007"`). The sequence is 1-based
/// and capped at 999 per department per service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TicketNumber {
    department: Department,
    sequence: u16,
}

/// Highest sequence a department can hand out in one service day.
pub const MAX_SEQUENCE: u16 = 999;

impl TicketNumber {
    /// Build a number from its parts.
    ///
    /// Returns `None` when `sequence` is outside `1..=999`.
    #[must_use]
    pub fn new(department: Department, sequence: u16) -> Option<Self> {
        if (1..=MAX_SEQUENCE).contains(&sequence) {
            Some(Self {
                department,
                sequence,
            })
        } else {
            None
        }
    }

    /// The first number of a department's day (`A001` for the dean).
    #[must_use]
    pub const fn first(department: Department) -> Self {
        Self {
            department,
            sequence: 1,
        }
    }

    /// The owning department.
    #[must_use]
    pub const fn department(self) -> Department {
        self.department
    }

    /// The numeric component, `1..=999`.
    #[must_use]
    pub const fn sequence(self) -> u16 {
        self.sequence
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.department.prefix(), self.sequence)
    }
}

impl FromStr for TicketNumber {
    type Err = crate::error::DesklineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || crate::error::DesklineError::InvalidRequest {
            reason: format!("invalid ticket number '{value}'"),
        };
        let mut chars = value.chars();
        let prefix = chars.next().ok_or_else(invalid)?;
        let department = Department::from_prefix(prefix).ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence: u16 = digits.parse().map_err(|_| invalid())?;
        Self::new(department, sequence).ok_or_else(invalid)
    }
}

impl From<TicketNumber> for String {
    fn from(number: TicketNumber) -> Self {
        number.to_string()
    }
}

impl TryFrom<String> for TicketNumber {
    type Error = crate::error::DesklineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One visitor's queue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Primary key, client-supplied
    pub id: TicketId,
    /// Visitor-facing code, unique per department per service day
    pub number: TicketNumber,
    /// Which desk the visitor is queueing for
    pub department: Department,
    /// Label printed on the ticket (defaults to the department name)
    pub person: String,
    /// Service day the number was drawn for
    pub service_day: NaiveDate,
    /// Creation stamp; defines FCFS order (ties broken by `id`)
    pub created_at: DateTime<Utc>,
    /// Primary lifecycle state
    pub state: TicketState,
    /// Visitor has tapped "I'm here"
    pub is_present: bool,
    /// When presence was last asserted
    pub present_at: Option<DateTime<Utc>>,
    /// Audio alerts for this ticket are suppressed (only while called)
    pub is_muted: bool,
    /// First time the visitor opened their status page
    pub accessed_at: Option<DateTime<Utc>>,
    /// Who called the visitor, and when
    pub called_by: Option<String>,
    pub called_at: Option<DateTime<Utc>>,
    /// Who completed the ticket, and when
    pub completed_by: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Who sent the ticket back to the queue, and when
    pub returned_by: Option<String>,
    pub returned_at: Option<DateTime<Utc>>,
    /// Who muted the alert, and when
    pub muted_by: Option<String>,
    pub muted_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Create a fresh waiting ticket.
    #[must_use]
    pub fn new(
        id: TicketId,
        number: TicketNumber,
        person: impl Into<String>,
        service_day: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            number,
            department: number.department(),
            person: person.into(),
            service_day,
            created_at,
            state: TicketState::Waiting,
            is_present: false,
            present_at: None,
            is_muted: false,
            accessed_at: None,
            called_by: None,
            called_at: None,
            completed_by: None,
            completed_at: None,
            returned_by: None,
            returned_at: None,
            muted_by: None,
            muted_at: None,
        }
    }

    /// Whether the ticket is still in the queue.
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        matches!(self.state, TicketState::Waiting)
    }

    /// Whether the visitor has been called to the desk.
    #[must_use]
    pub const fn is_called(&self) -> bool {
        matches!(self.state, TicketState::Called)
    }

    /// Whether the ticket reached its terminal state.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.state, TicketState::Completed)
    }

    /// Whether staff has ever taken this ticket; stays true after
    /// completion, matching the deployed wire contract.
    #[must_use]
    pub const fn was_taken(&self) -> bool {
        matches!(self.state, TicketState::Called | TicketState::Completed)
    }

    /// Service day formatted for clients (`2025-09-01`).
    #[must_use]
    pub fn date_string(&self) -> String {
        self.service_day.format("%Y-%m-%d").to_string()
    }

    /// Creation time formatted for clients (`09:15 AM`) in the reporting
    /// timezone.
    #[must_use]
    pub fn time_string(&self, offset: FixedOffset) -> String {
        self.created_at
            .with_timezone(&offset)
            .format("%I:%M %p")
            .to_string()
    }

    /// Completion time in the same client format, if completed.
    #[must_use]
    pub fn completed_time_string(&self, offset: FixedOffset) -> Option<String> {
        self.completed_at
            .map(|at| at.with_timezone(&offset).format("%I:%M %p").to_string())
    }
}
