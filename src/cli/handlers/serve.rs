//! Handler for the `serve` command
//!
//! Loads configuration, applies command-line overrides, and hosts the
//! HTTP API until the process is stopped.

use crate::api;
use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::error::Result;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Handler for the `serve` command
///
/// # Arguments
///
/// * `host` - Bind address override from the command line
/// * `port` - Bind port override from the command line
/// * `config_path` - Optional config file path from `--config`
/// * `output` - Output formatter for startup messages
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the server
/// fails to bind or run.
pub fn handle_serve(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&str>,
    output: &OutputFormatter,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load_or_default()?,
    };
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    // Honors RUST_LOG; falls back to request-level visibility. A no-op
    // when --verbose already installed a subscriber.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("deskline=info,tower_http=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    output.info(&format!(
        "Serving deskline on http://{}:{}",
        config.server.host, config.server.port
    ));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::serve(&config))
}
