//! Error types for the deskline queue service
//!
//! All fallible operations in the crate return [`Result`], built on the
//! closed [`DesklineError`] enumeration. Every queue-facing failure is a
//! per-request outcome: nothing in this module is fatal to the process,
//! and the HTTP boundary maps each kind to a status code without
//! re-deriving business rules.

use crate::core::{Department, TicketState};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DesklineError>;

/// All error conditions the queue service can report.
#[derive(Debug, Error)]
pub enum DesklineError {
    /// No ticket with the given id exists (or it is no longer visible).
    #[error("Ticket not found: {id}")]
    TicketNotFound {
        /// The id that was looked up
        id: String,
    },

    /// The department slug or prefix is not one of the known departments.
    #[error("Unknown department: {value}")]
    UnknownDepartment {
        /// The slug or prefix as received
        value: String,
    },

    /// A lifecycle action's precondition did not hold. No mutation was
    /// applied; `state` is the ticket's state at the time of the attempt.
    #[error("Cannot {action} a ticket that is {state}")]
    InvalidTransition {
        /// The action that was attempted, e.g. `"call"`
        action: &'static str,
        /// The state the ticket was in
        state: TicketState,
    },

    /// An insert was attempted with an id that is already present.
    #[error("Ticket already exists: {id}")]
    DuplicateTicket {
        /// The conflicting id
        id: String,
    },

    /// The department's sequence space for the current service day is used
    /// up. Numbering resumes when the service day rolls over.
    #[error("No more numbers available today for {department}")]
    SequenceExhausted {
        /// The department whose counter hit the daily limit
        department: Department,
    },

    /// The request itself was refused (bad confirmation phrase, unknown
    /// status value, and similar payload-level problems).
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// Human-readable refusal
        reason: String,
    },

    /// The ticket store could not be reached. With the in-process store
    /// this means a poisoned lock; a panic elsewhere must not cascade into
    /// silent data corruption here.
    #[error("Ticket store unavailable: {reason}")]
    StoreUnavailable {
        /// What failed
        reason: String,
    },

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// I/O error from the surrounding environment.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for errors raised at the binary edge.
    #[error("{0}")]
    Custom(String),
}

impl DesklineError {
    /// Create a custom error from any displayable value.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Message suitable for end users (CLI output, HTTP bodies).
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::TicketNotFound { .. } => {
                "Ticket not found or already completed".to_string()
            },
            Self::SequenceExhausted { department } => format!(
                "No more queue numbers available today for {department}; please come back tomorrow"
            ),
            other => other.to_string(),
        }
    }

    /// Suggestions shown under the error in CLI output.
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownDepartment { .. } => vec![
                "Run 'deskline departments' to list valid slugs and prefixes".to_string(),
            ],
            Self::Config { .. } => vec![
                "Check the config file passed via --config".to_string(),
                "Environment overrides use the DESKLINE_ prefix, e.g. DESKLINE_SERVER__PORT".to_string(),
            ],
            Self::SequenceExhausted { .. } => vec![
                "The counter resets at the next service day".to_string(),
            ],
            _ => Vec::new(),
        }
    }

    /// Whether the caller can sensibly retry or correct the request.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::StoreUnavailable { .. } | Self::Io(_))
    }

    /// Whether this is a configuration problem rather than a queue outcome.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<config::ConfigError> for DesklineError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
