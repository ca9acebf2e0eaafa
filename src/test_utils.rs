//! Test utilities for deskline
//!
//! Shared fixtures for unit tests across the crate. The main one is
//! [`ManualClock`], a settable [`Clock`] that makes day-rollover and
//! timestamp-sensitive behavior deterministic.

#![cfg(test)]

use crate::queue::Clock;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// A clock that only moves when a test tells it to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at an RFC 3339 timestamp.
    pub fn at(timestamp: &str) -> Self {
        Self {
            now: Mutex::new(parse(timestamp)),
        }
    }

    /// Move the clock to an RFC 3339 timestamp.
    pub fn set(&self, timestamp: &str) {
        *self.now.lock().unwrap() = parse(timestamp);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

fn parse(timestamp: &str) -> DateTime<Utc> {
    timestamp
        .parse()
        .unwrap_or_else(|_| panic!("invalid test timestamp: {timestamp}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen_until_set() {
        let clock = ManualClock::at("2025-09-01T08:00:00Z");
        assert_eq!(clock.now(), clock.now());

        clock.set("2025-09-02T08:00:00Z");
        assert_eq!(
            clock.now(),
            "2025-09-02T08:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
