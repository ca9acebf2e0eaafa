use crate::core::{Department, Ticket, TicketAction, TicketId};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};

/// Repository trait for ticket storage operations
///
/// This trait is the store contract the queue service is written against:
/// inserts, lookups, the atomic compare-and-transition that commits every
/// lifecycle action, and the FCFS department listing. Implementations must
/// be safe to share across request handlers.
pub trait TicketRepository: Send + Sync {
    /// Inserts a new ticket, rejecting duplicate ids
    fn insert(&self, ticket: Ticket) -> Result<Ticket>;

    /// Loads a ticket by ID
    fn get(&self, id: &TicketId) -> Result<Ticket>;

    /// Checks if a ticket exists by ID
    fn exists(&self, id: &TicketId) -> Result<bool>;

    /// Atomically validates `action` against the stored state and commits
    /// its effect; the sole mutation entry point for lifecycle changes
    fn compare_and_transition(
        &self,
        id: &TicketId,
        action: &TicketAction,
        now: DateTime<Utc>,
    ) -> Result<Ticket>;

    /// Lists a department's tickets ordered by `created_at`, ties broken
    /// by id
    fn list_by_department(
        &self,
        department: Department,
        include_completed: bool,
    ) -> Result<Vec<Ticket>>;

    /// Highest sequence used by a department on a service day (0 if none)
    fn max_sequence(&self, department: Department, service_day: NaiveDate) -> Result<u16>;

    /// Records the first time a ticket's status page was viewed
    fn mark_accessed(&self, id: &TicketId, now: DateTime<Utc>) -> Result<Ticket>;

    /// Recently completed tickets for a department, newest first
    fn recent_completed(&self, department: Department, limit: usize) -> Result<Vec<Ticket>>;

    /// Total stored tickets
    fn count(&self) -> Result<usize>;

    /// Removes every ticket, returning how many were removed
    fn clear(&self) -> Result<usize>;
}

use super::memory::MemoryStorage;

impl TicketRepository for MemoryStorage {
    fn insert(&self, ticket: Ticket) -> Result<Ticket> {
        self.insert_ticket(ticket)
    }

    fn get(&self, id: &TicketId) -> Result<Ticket> {
        self.load_ticket(id)
    }

    fn exists(&self, id: &TicketId) -> Result<bool> {
        self.ticket_exists(id)
    }

    fn compare_and_transition(
        &self,
        id: &TicketId,
        action: &TicketAction,
        now: DateTime<Utc>,
    ) -> Result<Ticket> {
        self.transition_ticket(id, action, now)
    }

    fn list_by_department(
        &self,
        department: Department,
        include_completed: bool,
    ) -> Result<Vec<Ticket>> {
        self.department_tickets(department, include_completed)
    }

    fn max_sequence(&self, department: Department, service_day: NaiveDate) -> Result<u16> {
        self.max_sequence_for(department, service_day)
    }

    fn mark_accessed(&self, id: &TicketId, now: DateTime<Utc>) -> Result<Ticket> {
        MemoryStorage::mark_accessed(self, id, now)
    }

    fn recent_completed(&self, department: Department, limit: usize) -> Result<Vec<Ticket>> {
        self.recently_completed(department, limit)
    }

    fn count(&self) -> Result<usize> {
        self.ticket_count()
    }

    fn clear(&self) -> Result<usize> {
        self.clear_all()
    }
}
