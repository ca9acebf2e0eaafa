//! Ticket lifecycle rules
//!
//! The single authority on which actions are legal in which state and
//! what each one changes. [`apply`] is pure: it takes the stored ticket,
//! an action, and the current time, and returns either the updated ticket
//! or [`InvalidTransition`](crate::error::DesklineError::InvalidTransition)
//! with no partial effects. The store commits the result under its own
//! lock, which is what makes concurrent conflicting staff actions resolve
//! to exactly one winner.
//!
//! State/action table:
//!
//! | Action            | Allowed when        | Changes                                   |
//! |-------------------|---------------------|-------------------------------------------|
//! | `Call`            | waiting             | state → called, called stamp              |
//! | `ReturnToWaiting` | called              | state → waiting, clears call + mute       |
//! | `Complete`        | waiting or called   | state → completed, clears mute + presence |
//! | `MarkPresent`     | not completed       | presence flag + stamp                     |
//! | `CancelPresent`   | not completed       | clears presence flag + stamp              |
//! | `Mute`            | called              | mute flag + stamp                         |
//! | `Unmute`          | called              | clears mute flag + stamp                  |
//!
//! Completing straight from `waiting` is deliberate: staff may serve a
//! visitor who walked up without being formally called.

use super::{Ticket, TicketState};
use crate::error::{DesklineError, Result};
use chrono::{DateTime, Utc};

/// An action a staff member or visitor can apply to a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketAction {
    /// Staff calls the visitor to the desk.
    Call {
        /// Desk identity recorded as `called_by`
        by: String,
    },
    /// Staff sends a called visitor back into the queue.
    ReturnToWaiting {
        /// Desk identity recorded as `returned_by`
        by: String,
    },
    /// Staff finishes with the visitor (called or not).
    Complete {
        /// Desk identity recorded as `completed_by`
        by: String,
    },
    /// Visitor taps "I'm here".
    MarkPresent,
    /// Visitor retracts "I'm here".
    CancelPresent,
    /// Staff suppresses the repeating audio alert for a called ticket.
    Mute {
        /// Desk identity recorded as `muted_by`
        by: String,
    },
    /// Staff re-enables the audio alert.
    Unmute,
}

impl TicketAction {
    /// Short verb used in error messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Call { .. } => "call",
            Self::ReturnToWaiting { .. } => "return",
            Self::Complete { .. } => "complete",
            Self::MarkPresent => "mark present",
            Self::CancelPresent => "cancel presence for",
            Self::Mute { .. } => "mute",
            Self::Unmute => "unmute",
        }
    }

    /// States in which this action is allowed.
    #[must_use]
    pub const fn allowed_states(&self) -> &'static [TicketState] {
        match self {
            Self::Call { .. } => &[TicketState::Waiting],
            Self::ReturnToWaiting { .. } | Self::Mute { .. } | Self::Unmute => {
                &[TicketState::Called]
            },
            Self::Complete { .. } | Self::MarkPresent | Self::CancelPresent => {
                &[TicketState::Waiting, TicketState::Called]
            },
        }
    }
}

/// Apply `action` to `ticket`, returning the updated ticket.
///
/// # Errors
///
/// Returns [`DesklineError::InvalidTransition`] carrying the action name
/// and the ticket's current state when the precondition does not hold.
pub fn apply(ticket: &Ticket, action: &TicketAction, now: DateTime<Utc>) -> Result<Ticket> {
    if !action.allowed_states().contains(&ticket.state) {
        return Err(DesklineError::InvalidTransition {
            action: action.name(),
            state: ticket.state,
        });
    }

    let mut next = ticket.clone();
    match action {
        TicketAction::Call { by } => {
            next.state = TicketState::Called;
            next.called_by = Some(by.clone());
            next.called_at = Some(now);
        },
        TicketAction::ReturnToWaiting { by } => {
            next.state = TicketState::Waiting;
            next.called_by = None;
            next.called_at = None;
            clear_mute(&mut next);
            next.returned_by = Some(by.clone());
            next.returned_at = Some(now);
        },
        TicketAction::Complete { by } => {
            next.state = TicketState::Completed;
            next.completed_by = Some(by.clone());
            next.completed_at = Some(now);
            clear_mute(&mut next);
            next.is_present = false;
            next.present_at = None;
        },
        TicketAction::MarkPresent => {
            next.is_present = true;
            next.present_at = Some(now);
        },
        TicketAction::CancelPresent => {
            next.is_present = false;
            next.present_at = None;
        },
        TicketAction::Mute { by } => {
            next.is_muted = true;
            next.muted_by = Some(by.clone());
            next.muted_at = Some(now);
        },
        TicketAction::Unmute => clear_mute(&mut next),
    }
    Ok(next)
}

fn clear_mute(ticket: &mut Ticket) {
    ticket.is_muted = false;
    ticket.muted_by = None;
    ticket.muted_at = None;
}
