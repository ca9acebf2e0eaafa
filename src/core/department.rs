//! Departments served by the queue
//!
//! Each department owns one letter of the ticket-number space: a visitor
//! heading to the Dean's office draws `A` numbers, the IE chairperson's
//! queue draws `B` numbers, and so on. The set is fixed at compile time;
//! adding an office means adding a variant here.

use crate::error::DesklineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A service desk a visitor can queue for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    /// Dean's office, prefix `A`
    Dean,
    /// IE chairperson, prefix `B`
    IeChair,
    /// CPE chairperson, prefix `C`
    CpeChair,
    /// ECE chairperson, prefix `D`
    EceChair,
    /// Everything else, prefix `E`
    Others,
}

impl Department {
    /// All departments in prefix order.
    pub const ALL: [Self; 5] = [
        Self::Dean,
        Self::IeChair,
        Self::CpeChair,
        Self::EceChair,
        Self::Others,
    ];

    /// The single-letter prefix embedded in ticket numbers.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Dean => 'A',
            Self::IeChair => 'B',
            Self::CpeChair => 'C',
            Self::EceChair => 'D',
            Self::Others => 'E',
        }
    }

    /// URL-safe identifier used in routes and config.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Dean => "dean",
            Self::IeChair => "ie-chair",
            Self::CpeChair => "cpe-chair",
            Self::EceChair => "ece-chair",
            Self::Others => "others",
        }
    }

    /// Name shown to visitors on tickets and boards.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Dean => "Dean's Office",
            Self::IeChair => "IE Chairperson",
            Self::CpeChair => "CPE Chairperson",
            Self::EceChair => "ECE Chairperson",
            Self::Others => "Other Concerns",
        }
    }

    /// Look up a department by its number prefix, case-insensitive.
    #[must_use]
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'A' => Some(Self::Dean),
            'B' => Some(Self::IeChair),
            'C' => Some(Self::CpeChair),
            'D' => Some(Self::EceChair),
            'E' => Some(Self::Others),
            _ => None,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts either the slug (`ie-chair`) or the prefix letter (`B`/`b`).
impl FromStr for Department {
    type Err = DesklineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let mut chars = value.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(department) = Self::from_prefix(c) {
                return Ok(department);
            }
        }
        let lower = value.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.slug() == lower)
            .ok_or_else(|| DesklineError::UnknownDepartment {
                value: value.to_string(),
            })
    }
}
