//! Output formatting for the CLI
//!
//! One formatter for the whole binary: human-readable lines by default,
//! machine-readable JSON under `--json`. Status glyphs are colored
//! unless `--no-color` asks otherwise; errors and warnings go to stderr
//! so piped JSON stays clean.

use crate::error::{DesklineError, Result};
use colored::Colorize;
use serde::Serialize;

/// Formats command results for humans or machines.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    json: bool,
    no_color: bool,
}

impl OutputFormatter {
    /// Create a formatter from the global CLI flags.
    #[must_use]
    pub const fn new(json: bool, no_color: bool) -> Self {
        Self { json, no_color }
    }

    /// Whether `--json` output was requested.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Plain informational line; suppressed in JSON mode.
    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    /// Success line with a check mark; suppressed in JSON mode.
    pub fn success(&self, message: &str) {
        if self.json {
            return;
        }
        if self.no_color {
            println!("✓ {message}");
        } else {
            println!("{} {message}", "✓".green());
        }
    }

    /// Warning line on stderr; suppressed in JSON mode.
    pub fn warning(&self, message: &str) {
        if self.json {
            return;
        }
        if self.no_color {
            eprintln!("⚠ {message}");
        } else {
            eprintln!("{} {message}", "⚠".yellow());
        }
    }

    /// Error line on stderr; printed in every mode.
    pub fn error(&self, message: &str) {
        if self.no_color || self.json {
            eprintln!("✗ {message}");
        } else {
            eprintln!("{} {message}", "✗".red());
        }
    }

    /// Pretty-print a value as JSON on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error when the value cannot be serialized.
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| DesklineError::custom(format!("failed to render JSON: {e}")))?;
        println!("{rendered}");
        Ok(())
    }
}
