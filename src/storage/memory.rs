//! In-process ticket storage
//!
//! [`MemoryStorage`] keeps the whole ticket table behind one `RwLock`.
//! Transitions take the write lock for their whole read-validate-write
//! cycle, which is what gives `compare_and_transition` its atomicity:
//! two desks racing to call the same ticket serialize on the lock, and
//! the loser sees the already-updated state and gets the typed rejection.
//!
//! A poisoned lock (a panic while holding it) is reported as
//! `StoreUnavailable` rather than cascading the panic into every request.

use crate::core::{Department, Ticket, TicketAction, TicketId, apply};
use crate::error::{DesklineError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock-guarded ticket table.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tickets: RwLock<HashMap<TicketId, Ticket>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<TicketId, Ticket>>> {
        self.tickets
            .read()
            .map_err(|_| DesklineError::StoreUnavailable {
                reason: "ticket table lock poisoned".to_string(),
            })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<TicketId, Ticket>>> {
        self.tickets
            .write()
            .map_err(|_| DesklineError::StoreUnavailable {
                reason: "ticket table lock poisoned".to_string(),
            })
    }

    /// Insert a new ticket, refusing duplicate ids.
    pub fn insert_ticket(&self, ticket: Ticket) -> Result<Ticket> {
        let mut tickets = self.write()?;
        if tickets.contains_key(&ticket.id) {
            return Err(DesklineError::DuplicateTicket {
                id: ticket.id.to_string(),
            });
        }
        tickets.insert(ticket.id.clone(), ticket.clone());
        Ok(ticket)
    }

    /// Fetch a ticket by id.
    pub fn load_ticket(&self, id: &TicketId) -> Result<Ticket> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| DesklineError::TicketNotFound { id: id.to_string() })
    }

    /// Whether a ticket with this id exists.
    pub fn ticket_exists(&self, id: &TicketId) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }

    /// Validate and apply a lifecycle action under the write lock.
    pub fn transition_ticket(
        &self,
        id: &TicketId,
        action: &TicketAction,
        now: DateTime<Utc>,
    ) -> Result<Ticket> {
        let mut tickets = self.write()?;
        let current = tickets
            .get(id)
            .ok_or_else(|| DesklineError::TicketNotFound { id: id.to_string() })?;
        let updated = apply(current, action, now)?;
        tickets.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    /// All tickets for a department in FCFS order (`created_at`, then id).
    pub fn department_tickets(
        &self,
        department: Department,
        include_completed: bool,
    ) -> Result<Vec<Ticket>> {
        let tickets = self.read()?;
        let mut rows: Vec<Ticket> = tickets
            .values()
            .filter(|t| t.department == department)
            .filter(|t| include_completed || !t.is_completed())
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    /// Highest sequence already used by a department on a service day.
    ///
    /// Returns 0 for an untouched partition; the allocator seeds its
    /// counter from this exactly once per day.
    pub fn max_sequence_for(&self, department: Department, service_day: NaiveDate) -> Result<u16> {
        let tickets = self.read()?;
        Ok(tickets
            .values()
            .filter(|t| t.department == department && t.service_day == service_day)
            .map(|t| t.number.sequence())
            .max()
            .unwrap_or(0))
    }

    /// Stamp the first status-page view; later views keep the original stamp.
    pub fn mark_accessed(&self, id: &TicketId, now: DateTime<Utc>) -> Result<Ticket> {
        let mut tickets = self.write()?;
        let ticket = tickets
            .get_mut(id)
            .ok_or_else(|| DesklineError::TicketNotFound { id: id.to_string() })?;
        if ticket.accessed_at.is_none() {
            ticket.accessed_at = Some(now);
        }
        Ok(ticket.clone())
    }

    /// Most recently completed tickets for a department, newest first.
    pub fn recently_completed(&self, department: Department, limit: usize) -> Result<Vec<Ticket>> {
        let tickets = self.read()?;
        let mut rows: Vec<Ticket> = tickets
            .values()
            .filter(|t| t.department == department && t.is_completed())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        rows.truncate(limit);
        Ok(rows)
    }

    /// Total number of stored tickets.
    pub fn ticket_count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Drop every ticket, returning how many were removed.
    pub fn clear_all(&self) -> Result<usize> {
        let mut tickets = self.write()?;
        let removed = tickets.len();
        tickets.clear();
        Ok(removed)
    }
}
