//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Directory holding the GTFS CSV files.
pub const GTFS_DIR_VAR: &str = "GTFS_DIR";
/// Address the HTTP server binds to.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
/// Window width used when a request does not give one.
pub const WINDOW_HOURS_VAR: &str = "DEFAULT_WINDOW_HOURS";

/// Error reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} is not a whole number of hours: {value:?}")]
    InvalidHours { var: &'static str, value: String },
}

/// Configuration for the itinerary server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Directory the GTFS feed is loaded from at startup.
    pub gtfs_dir: PathBuf,

    pub bind_addr: SocketAddr,

    /// Window width for requests that omit `window_hours`.
    pub default_window_hours: u32,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        gtfs_dir: impl Into<PathBuf>,
        bind_addr: SocketAddr,
        default_window_hours: u32,
    ) -> Self {
        Self {
            gtfs_dir: gtfs_dir.into(),
            bind_addr,
            default_window_hours,
        }
    }

    /// Read the configuration from process environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(GTFS_DIR_VAR) {
            config.gtfs_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value.trim().parse().map_err(|_| ConfigError::InvalidAddr {
                var: BIND_ADDR_VAR,
                value,
            })?;
        }
        if let Some(value) = lookup(WINDOW_HOURS_VAR) {
            config.default_window_hours =
                value.trim().parse().map_err(|_| ConfigError::InvalidHours {
                    var: WINDOW_HOURS_VAR,
                    value,
                })?;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            gtfs_dir: PathBuf::from("./gtfs"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            default_window_hours: 3,
        }
    }
}
