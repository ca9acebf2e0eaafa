//! Lifecycle states and staff availability
//!
//! [`TicketState`] is the primary lifecycle state of a ticket; the
//! presence and mute booleans on the ticket overlay it and are managed by
//! the same transition rules. [`StaffStatus`] is what the department
//! status register tracks per desk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary lifecycle state of a ticket.
///
/// `Completed` is terminal: no action may move a ticket out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketState {
    /// In the queue, not yet taken by staff
    Waiting,
    /// Staff has called the visitor to the desk
    Called,
    /// Served (or dismissed); kept read-only for the activity feed
    Completed,
}

impl TicketState {
    /// Wire and display form, always lowercase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Called => "called",
            Self::Completed => "completed",
        }
    }

    /// Whether any further transition is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TicketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability of a department's staff, shown to waiting visitors.
///
/// Defaults to `Available`; the register never persists it, so every
/// process start is a clean slate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffStatus {
    /// Desk is staffed and taking visitors
    #[default]
    Available,
    /// Staffed but currently with a visitor
    Busy,
    /// Desk unattended; waiting visitors see "Admin Away"
    Away,
}

impl StaffStatus {
    /// Wire and display form, always lowercase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Away => "away",
        }
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffStatus {
    type Err = crate::error::DesklineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "busy" => Ok(Self::Busy),
            "away" => Ok(Self::Away),
            other => Err(crate::error::DesklineError::InvalidRequest {
                reason: format!("unknown staff status '{other}'"),
            }),
        }
    }
}
