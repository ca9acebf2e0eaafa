//! Department staff-status register
//!
//! A process-wide map of desk availability, owned by the service and
//! passed by handle, never ambient global state. Writes fully replace the
//! prior value (last-write-wins); readers always observe some previously
//! written value. Nothing here is persisted: every process start begins
//! with all desks `Available`.

use crate::core::{Department, StaffStatus};
use std::collections::HashMap;
use std::sync::RwLock;

/// Lock-guarded availability map, defaulting to `Available`.
#[derive(Debug, Default)]
pub struct StatusRegister {
    statuses: RwLock<HashMap<Department, StaffStatus>>,
}

impl StatusRegister {
    /// Create a register with every desk `Available`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a department's status.
    pub fn set(&self, department: Department, status: StaffStatus) {
        // Entries are single Copy values, so a recovered lock never
        // exposes a torn write.
        let mut statuses = self
            .statuses
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        statuses.insert(department, status);
    }

    /// Current status for a department, `Available` if never set.
    #[must_use]
    pub fn get(&self, department: Department) -> StaffStatus {
        let statuses = self
            .statuses
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        statuses.get(&department).copied().unwrap_or_default()
    }

    /// Every department's current status, defaults included.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<Department, StaffStatus> {
        Department::ALL
            .into_iter()
            .map(|department| (department, self.get(department)))
            .collect()
    }
}
