//! Queue service facade
//!
//! [`QueueService`] owns the store, the sequence allocator, the staff
//! status register, and the clock, and exposes the operations the HTTP
//! handlers and CLI drive: taking a number, the staff lifecycle actions,
//! visitor views, and maintenance. Handlers stay thin; every rule lives
//! here or below.

use crate::core::{Department, StaffStatus, Ticket, TicketAction, TicketId};
use crate::error::{DesklineError, Result};
use crate::queue::allocator::{Clock, SequenceAllocator, SystemClock};
use crate::queue::register::StatusRegister;
use crate::queue::view::{DisplayStatus, display_status, position_of};
use crate::storage::{MemoryStorage, TicketRepository};
use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// How many completed tickets the activity feed shows.
const ACTIVITY_LIMIT: usize = 10;

/// Confirmation phrase required by [`QueueService::purge_all`].
pub const PURGE_CONFIRMATION: &str = "DELETE_ALL_QUEUES_PERMANENTLY";

/// A "take a number" request, as received from a kiosk.
#[derive(Debug, Clone)]
pub struct TakeNumber {
    /// Client-generated id; a UUID is generated when absent
    pub id: Option<TicketId>,
    /// Which desk the visitor wants
    pub department: Department,
    /// Optional label; defaults to the department's display name
    pub person: Option<String>,
}

impl TakeNumber {
    /// Request a number for a department with all defaults.
    #[must_use]
    pub const fn for_department(department: Department) -> Self {
        Self {
            id: None,
            department,
            person: None,
        }
    }
}

/// What the visitor's status page shows.
#[derive(Debug, Clone, Serialize)]
pub struct VisitorStatus {
    /// Banner derived by the view rules
    pub status: DisplayStatus,
    /// The visitor's number, e.g. `B012`
    pub queue_number: String,
    /// Department slug
    pub department: Department,
    /// Desk availability at read time
    pub admin_status: StaffStatus,
    /// Whether the visitor has been called
    pub is_called: bool,
    /// Whether the visitor has tapped "I'm here"
    pub is_present: bool,
    /// 1-based place in the open queue
    pub position: Option<usize>,
    /// Open tickets in the department, this one included
    pub total_waiting: usize,
}

/// Day-rollover check for a stored ticket.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PreviousDayCheck {
    /// True when the ticket's day is over
    pub is_previous_day: bool,
    /// The day the ticket was issued for
    pub queue_date: NaiveDate,
    /// The current service day
    pub today: NaiveDate,
}

/// The queue engine behind every endpoint.
pub struct QueueService<R = MemoryStorage>
where
    R: TicketRepository,
{
    repository: R,
    allocator: SequenceAllocator,
    register: StatusRegister,
    clock: Arc<dyn Clock>,
}

impl QueueService<MemoryStorage> {
    /// In-memory service with the system clock; what `serve` runs.
    #[must_use]
    pub fn in_memory(offset: FixedOffset) -> Self {
        Self::new(MemoryStorage::new(), offset)
    }
}

impl<R> QueueService<R>
where
    R: TicketRepository,
{
    /// Build a service over an existing store.
    #[must_use]
    pub fn new(repository: R, offset: FixedOffset) -> Self {
        Self::with_clock(repository, offset, Arc::new(SystemClock))
    }

    /// Build a service with an injected clock (tests use a manual one).
    #[must_use]
    pub fn with_clock(repository: R, offset: FixedOffset, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            allocator: SequenceAllocator::new(offset),
            register: StatusRegister::new(),
            clock,
        }
    }

    /// The reporting timezone offset (client-facing time strings).
    #[must_use]
    pub const fn reporting_offset(&self) -> FixedOffset {
        self.allocator.offset()
    }

    /// The current service day.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.allocator.service_day(self.clock.now())
    }

    /// Allocate the next number and insert the ticket, atomically with
    /// respect to other take-a-number requests for the same department.
    ///
    /// # Errors
    ///
    /// `SequenceExhausted` when the department's day is full,
    /// `DuplicateTicket` when the client reuses an id.
    pub fn take_number(&self, request: TakeNumber) -> Result<Ticket> {
        let id = request.id.unwrap_or_default();
        if self.repository.exists(&id)? {
            return Err(DesklineError::DuplicateTicket { id: id.to_string() });
        }

        let issued = self
            .allocator
            .allocate(&self.repository, self.clock.as_ref(), request.department)?;
        let person = request
            .person
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| request.department.display_name().to_string());
        let ticket = Ticket::new(id, issued.number, person, issued.service_day, issued.issued_at);
        let ticket = self.repository.insert(ticket)?;

        info!(
            number = %ticket.number,
            department = ticket.department.slug(),
            "issued queue number"
        );
        Ok(ticket)
    }

    /// Fetch a ticket without side effects.
    pub fn ticket(&self, id: &TicketId) -> Result<Ticket> {
        self.repository.get(id)
    }

    /// Fetch a ticket for the visitor's own page, stamping the first view.
    pub fn view_ticket(&self, id: &TicketId) -> Result<Ticket> {
        self.repository.mark_accessed(id, self.clock.now())
    }

    /// Staff calls the visitor to the desk.
    pub fn call(&self, id: &TicketId, by: impl Into<String>) -> Result<Ticket> {
        self.transition(id, TicketAction::Call { by: by.into() })
    }

    /// Staff sends a called visitor back into the queue.
    pub fn return_to_waiting(&self, id: &TicketId, by: impl Into<String>) -> Result<Ticket> {
        self.transition(id, TicketAction::ReturnToWaiting { by: by.into() })
    }

    /// Staff finishes with the visitor; allowed straight from waiting.
    pub fn complete(&self, id: &TicketId, by: impl Into<String>) -> Result<Ticket> {
        self.transition(id, TicketAction::Complete { by: by.into() })
    }

    /// Staff suppresses the repeating alert for a called ticket.
    pub fn mute(&self, id: &TicketId, by: impl Into<String>) -> Result<Ticket> {
        self.transition(id, TicketAction::Mute { by: by.into() })
    }

    /// Staff re-enables the alert.
    pub fn unmute(&self, id: &TicketId) -> Result<Ticket> {
        self.transition(id, TicketAction::Unmute)
    }

    /// Visitor taps "I'm here".
    pub fn mark_present(&self, id: &TicketId) -> Result<Ticket> {
        self.transition(id, TicketAction::MarkPresent)
    }

    /// Visitor retracts "I'm here".
    pub fn cancel_present(&self, id: &TicketId) -> Result<Ticket> {
        self.transition(id, TicketAction::CancelPresent)
    }

    fn transition(&self, id: &TicketId, action: TicketAction) -> Result<Ticket> {
        let ticket = self
            .repository
            .compare_and_transition(id, &action, self.clock.now())?;
        info!(
            number = %ticket.number,
            action = action.name(),
            state = %ticket.state,
            "ticket transition"
        );
        Ok(ticket)
    }

    /// Full FCFS board for a desk, completed tickets included.
    pub fn department_board(&self, department: Department) -> Result<Vec<Ticket>> {
        self.repository.list_by_department(department, true)
    }

    /// Open (waiting or called) tickets for a desk, FCFS order.
    pub fn open_tickets(&self, department: Department) -> Result<Vec<Ticket>> {
        self.repository.list_by_department(department, false)
    }

    /// The visitor's status page payload.
    ///
    /// A completed ticket reads as not found: the status page disappears
    /// once the visit is over.
    pub fn visitor_status(&self, id: &TicketId) -> Result<VisitorStatus> {
        let ticket = self.repository.get(id)?;
        if ticket.is_completed() {
            return Err(DesklineError::TicketNotFound { id: id.to_string() });
        }

        let admin_status = self.register.get(ticket.department);
        let open = self.open_tickets(ticket.department)?;
        let position = position_of(&open, id).map(|rank| rank + 1);

        Ok(VisitorStatus {
            status: display_status(&ticket, admin_status),
            queue_number: ticket.number.to_string(),
            department: ticket.department,
            admin_status,
            is_called: ticket.is_called(),
            is_present: ticket.is_present,
            position,
            total_waiting: open.len(),
        })
    }

    /// Whether a stored ticket belongs to an earlier service day.
    pub fn previous_day_check(&self, id: &TicketId) -> Result<PreviousDayCheck> {
        let ticket = self.repository.get(id)?;
        let today = self.today();
        Ok(PreviousDayCheck {
            is_previous_day: ticket.service_day < today,
            queue_date: ticket.service_day,
            today,
        })
    }

    /// Last completed tickets for a desk, newest first.
    pub fn recent_activity(&self, department: Department) -> Result<Vec<Ticket>> {
        self.repository.recent_completed(department, ACTIVITY_LIMIT)
    }

    /// Update a desk's availability.
    pub fn set_staff_status(&self, department: Department, status: StaffStatus) {
        info!(department = department.slug(), status = %status, "staff status change");
        self.register.set(department, status);
    }

    /// A desk's current availability.
    #[must_use]
    pub fn staff_status(&self, department: Department) -> StaffStatus {
        self.register.get(department)
    }

    /// Total stored tickets (health reporting).
    pub fn ticket_count(&self) -> Result<usize> {
        self.repository.count()
    }

    /// Wipe every queue and restart numbering.
    ///
    /// Guarded twice: only the dean's desk may ask, and the exact
    /// [`PURGE_CONFIRMATION`] phrase must accompany the request.
    pub fn purge_all(&self, department: Department, confirmation: &str) -> Result<usize> {
        if department != Department::Dean {
            return Err(DesklineError::InvalidRequest {
                reason: "only the dean's desk may delete all queues".to_string(),
            });
        }
        if confirmation != PURGE_CONFIRMATION {
            return Err(DesklineError::InvalidRequest {
                reason: "confirmation phrase does not match".to_string(),
            });
        }
        let removed = self.repository.clear()?;
        self.allocator.reset();
        warn!(removed, "all queues deleted");
        Ok(removed)
    }
}
