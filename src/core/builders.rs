use super::{Department, Ticket, TicketId, TicketNumber, TicketState};
use chrono::{DateTime, NaiveDate, Utc};

/// Builder for creating Ticket instances
///
/// Used by the creation path and by tests that need tickets in a known
/// shape without walking the full lifecycle. Defaults: a fresh UUID id,
/// number `A001`, the department's display name as `person`, the current
/// time, and the `Waiting` state.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    number: Option<TicketNumber>,
    person: Option<String>,
    service_day: Option<NaiveDate>,
    created_at: Option<DateTime<Utc>>,
    state: Option<TicketState>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub fn id(mut self, id: impl Into<TicketId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the ticket number (also fixes the department)
    #[must_use]
    pub const fn number(mut self, number: TicketNumber) -> Self {
        self.number = Some(number);
        self
    }

    /// Set the visitor-facing label
    #[must_use]
    pub fn person(mut self, person: impl Into<String>) -> Self {
        self.person = Some(person.into());
        self
    }

    /// Set the service day
    #[must_use]
    pub const fn service_day(mut self, service_day: NaiveDate) -> Self {
        self.service_day = Some(service_day);
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the lifecycle state
    #[must_use]
    pub const fn state(mut self, state: TicketState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the ticket
    #[must_use]
    pub fn build(self) -> Ticket {
        let number = self.number.unwrap_or(TicketNumber::first(Department::Dean));
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        let mut ticket = Ticket::new(
            self.id.unwrap_or_default(),
            number,
            self.person
                .unwrap_or_else(|| number.department().display_name().to_string()),
            self.service_day
                .unwrap_or_else(|| created_at.date_naive()),
            created_at,
        );
        if let Some(state) = self.state {
            ticket.state = state;
        }
        ticket
    }
}
