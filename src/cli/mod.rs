//! Command-line interface for deskline
//!
//! Argument definitions live here; the work happens in [`handlers`].
//! `deskline serve` hosts the HTTP API, `deskline departments` prints
//! the fixed department table for kiosk setup.

pub mod handlers;
mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};

/// First-come-first-served ticket queue service for walk-in desks
#[derive(Debug, Parser)]
#[command(name = "deskline", version, about)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (defaults are used when absent)
    #[arg(short, long, global = true, env = "DESKLINE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Host the queue HTTP API
    Serve {
        /// Bind address, overriding the configured `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overriding the configured `server.port`
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List departments, their prefixes, and display names
    Departments,
}
