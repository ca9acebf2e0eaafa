//! Service configuration
//!
//! Layered the usual way: built-in defaults, then an optional config
//! file (`deskline.toml` in the working directory, or any file passed
//! via `--config`), then `DESKLINE_*` environment variables with `__`
//! separating sections, e.g. `DESKLINE_SERVER__PORT=8080`.

use crate::error::Result;
use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Queue behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Reporting timezone as minutes east of UTC; the host's local
    /// offset when unset. Day boundaries and client time strings use it.
    pub utc_offset_minutes: Option<i32>,
}

/// Audio alert hook settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Program run when staff triggers the lobby alert; receives the
    /// ticket number as its argument. Disabled when unset.
    pub command: Option<String>,
}

/// Complete service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener
    pub server: ServerConfig,
    /// Queue behavior
    pub queue: QueueConfig,
    /// Audio alert hook
    pub alert: AlertConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            queue: QueueConfig {
                utc_offset_minutes: None,
            },
            alert: AlertConfig { command: None },
        }
    }
}

impl Config {
    /// Load from `deskline.*` in the working directory plus environment
    /// overrides, falling back to defaults when neither is present.
    ///
    /// # Errors
    ///
    /// Returns a config error when a present file or variable fails to
    /// parse; absence is not an error.
    pub fn load_or_default() -> Result<Self> {
        Self::build(config::File::with_name("deskline").required(false))
    }

    /// Load from an explicit file path plus environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a config error when the file is missing or malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(config::File::from(path))
    }

    fn build(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("queue.utc_offset_minutes", None::<i64>)?
            .set_default("alert.command", None::<String>)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("DESKLINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// The reporting timezone as a fixed offset.
    ///
    /// Out-of-range configured values fall back to the host's local
    /// offset rather than failing a running service.
    #[must_use]
    pub fn reporting_offset(&self) -> FixedOffset {
        self.queue
            .utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
            .unwrap_or_else(|| Local::now().offset().fix())
    }
}
