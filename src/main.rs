//! deskline - queue number service for walk-in service desks
//!
//! This is the main entry point for the deskline CLI application.
//! It handles command-line argument parsing and dispatches to the
//! appropriate command handlers.

use clap::Parser;
use deskline::cli::{Cli, Commands, OutputFormatter, handlers::handle_departments};
use deskline::error::Result;
use std::process;

/// Main entry point for the deskline CLI
///
/// Parses command-line arguments and executes the requested command.
/// Handles errors gracefully and provides helpful messages to users.
fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Configure output formatter based on flags
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    // Execute the command and handle errors
    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
///
/// # Errors
///
/// Returns any error that occurs during command execution
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    // Set up logging if verbose mode is enabled
    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    }

    match cli.command {
        #[cfg(feature = "api")]
        Commands::Serve { host, port } => {
            deskline::cli::handlers::handle_serve(host, port, cli.config.as_deref(), formatter)
        },
        #[cfg(not(feature = "api"))]
        Commands::Serve { .. } => Err(deskline::error::DesklineError::custom(
            "this build does not include the HTTP server; rebuild with the `api` feature",
        )),
        Commands::Departments => handle_departments(formatter),
    }
}

/// Handle errors and display them to the user
///
/// Formats errors in a user-friendly way, including the main message,
/// any suggestions for fixing the problem, and a JSON rendition when
/// `--json` is active.
fn handle_error(error: &deskline::error::DesklineError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        }));
    }

    // In verbose mode, show the full error chain
    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
