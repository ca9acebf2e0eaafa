//! Core domain types for the queue service
//!
//! Everything in this module is pure data and pure rules: departments and
//! their number prefixes, the ticket model, the lifecycle state machine,
//! and a builder for constructing tickets. Storage and HTTP concerns live
//! elsewhere and depend on this module, never the other way around.

mod builders;
mod department;
mod lifecycle;
mod status;
mod ticket;

pub use builders::TicketBuilder;
pub use department::Department;
pub use lifecycle::{TicketAction, apply};
pub use status::{StaffStatus, TicketState};
pub use ticket::{MAX_SEQUENCE, Ticket, TicketId, TicketNumber};
