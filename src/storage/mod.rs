//! Ticket storage
//!
//! The store is the only place lifecycle changes are committed. The
//! [`TicketRepository`] trait captures the contract; [`MemoryStorage`] is
//! the in-process implementation the server runs on. Durability is out of
//! scope for this layer: a restart starts an empty table, and per-day
//! sequence counters reseed from whatever the table holds.

mod memory;
mod repository;

pub use memory::MemoryStorage;
pub use repository::TicketRepository;
