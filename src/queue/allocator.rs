//! Ticket number allocation
//!
//! One number per visitor, unique per department per service day, even
//! when every kiosk in the lobby is tapped at once. The allocator keeps a
//! mutex-guarded counter per (department, day); the first allocation of a
//! day seeds the counter from the store's highest used sequence, after
//! which the counter is authoritative. Both the sequence and the creation
//! stamp are produced inside the critical section, so FCFS order by
//! `created_at` can never disagree with sequence order.

use crate::core::{Department, TicketNumber};
use crate::error::{DesklineError, Result};
use crate::storage::TicketRepository;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

/// Time source for allocation stamps and service-day boundaries.
///
/// Production uses [`SystemClock`]; tests substitute a fixed clock to
/// exercise day rollover and exhaustion deterministically.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The result of one successful allocation: everything the creation path
/// needs to build the ticket.
#[derive(Debug, Clone, Copy)]
pub struct IssuedNumber {
    /// Formatted visitor-facing number
    pub number: TicketNumber,
    /// Numeric component, `1..=999`
    pub sequence: u16,
    /// Stamp taken inside the allocation critical section; becomes the
    /// ticket's `created_at`
    pub issued_at: DateTime<Utc>,
    /// Day partition the number belongs to
    pub service_day: NaiveDate,
}

/// Per-department, per-day sequence counters.
pub struct SequenceAllocator {
    offset: FixedOffset,
    counters: Mutex<HashMap<(Department, NaiveDate), u16>>,
}

impl SequenceAllocator {
    /// Create an allocator reporting service days in the given timezone
    /// offset.
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// The reporting timezone offset used for day boundaries.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The service day a given instant falls on.
    #[must_use]
    pub fn service_day(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Reserve the next number for `department`.
    ///
    /// Serialized per department and day by the counter mutex; the clock
    /// is read inside the lock so two allocations can never swap their
    /// sequence/stamp order.
    ///
    /// # Errors
    ///
    /// Returns [`DesklineError::SequenceExhausted`] once a department has
    /// used all 999 numbers of the day, and `StoreUnavailable` if the
    /// counter lock or the seeding read fails.
    pub fn allocate<R>(
        &self,
        repository: &R,
        clock: &dyn Clock,
        department: Department,
    ) -> Result<IssuedNumber>
    where
        R: TicketRepository + ?Sized,
    {
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| DesklineError::StoreUnavailable {
                reason: "sequence counter lock poisoned".to_string(),
            })?;

        let issued_at = clock.now();
        let service_day = self.service_day(issued_at);
        counters.retain(|(_, day), _| *day == service_day);

        let counter = match counters.entry((department, service_day)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(repository.max_sequence(department, service_day)?)
            },
        };

        let sequence = *counter + 1;
        let number = TicketNumber::new(department, sequence)
            .ok_or(DesklineError::SequenceExhausted { department })?;
        *counter = sequence;

        Ok(IssuedNumber {
            number,
            sequence,
            issued_at,
            service_day,
        })
    }

    /// Forget all counters; the next allocation reseeds from the store.
    /// Used when the store itself has been wiped.
    pub fn reset(&self) {
        if let Ok(mut counters) = self.counters.lock() {
            counters.clear();
        }
    }
}
