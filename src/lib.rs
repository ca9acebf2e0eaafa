//! deskline - A first-come-first-served ticket queue service for walk-in desks
//!
//! This crate runs the queue behind a row of service desks: visitors draw a
//! sequential number per department, staff call, return, mute, and complete
//! tickets from a dashboard, and everyone sees a consistent first-come-first-
//! served order even when every kiosk is tapped at once. Features include:
//! - Collision-free per-department, per-day ticket numbering
//! - A strict ticket state machine (waiting → called → completed)
//! - Visitor presence and per-ticket audio-mute flags
//! - A per-department staff availability register
//! - An HTTP API (axum) and a small CLI around the same service core

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]

//! # Concurrent Safety
//!
//! Number allocation is serialized per department and day, and every state
//! transition is validated and committed under the store's lock, so two
//! staff members racing to call or complete the same ticket resolve to
//! exactly one winner; the loser receives a typed rejection carrying the
//! state it lost to.
//!
//! # Example
//!
//! ```rust,ignore
//! use deskline::core::Department;
//! use deskline::queue::{QueueService, TakeNumber};
//! use chrono::FixedOffset;
//!
//! let service = QueueService::in_memory(FixedOffset::east_opt(8 * 3600)?);
//!
//! // Visitor draws a number at the kiosk
//! let ticket = service.take_number(TakeNumber::for_department(Department::Dean))?;
//! assert_eq!(ticket.number.to_string(), "A001");
//!
//! // Staff calls and completes from the dashboard
//! service.call(&ticket.id, "dean-desk")?;
//! service.complete(&ticket.id, "dean-desk")?;
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod queue;
pub mod storage;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{DesklineError, Result};
