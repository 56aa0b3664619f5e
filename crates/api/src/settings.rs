//! Service configuration
//!
//! Layered: built-in defaults, then an optional settings file, then
//! `MODEL_MONITOR__*` environment variables.

use crate::ServiceError;
use config::{Config, Environment, File};
use model_monitor::RegistrySettings;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// Environment variable naming the settings file
pub const CONFIG_PATH_ENV: &str = "MODEL_MONITOR_CONFIG";

/// Settings file looked up when no path is given (any supported extension)
const DEFAULT_CONFIG_NAME: &str = "monitor";

/// Top-level service settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub scheduler: SchedulerSettings,
    pub registry: RegistrySettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServerSettings {
    /// Parsed bind address
    pub fn socket_addr(&self) -> Result<SocketAddr, ServiceError> {
        self.bind_addr
            .parse()
            .map_err(|_| ServiceError::InvalidAddress(self.bind_addr.clone()))
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of plain text
    pub json: bool,
}

impl LoggingSettings {
    /// Parsed maximum log level
    pub fn max_level(&self) -> Result<Level, ServiceError> {
        self.level
            .parse()
            .map_err(|_| ServiceError::InvalidLogLevel(self.level.clone()))
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Periodic threshold check settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Seconds between threshold checks; 0 disables the scheduler
    pub check_interval_secs: u64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
        }
    }
}

impl SchedulerSettings {
    /// Check interval, or `None` when disabled
    pub fn interval(&self) -> Option<Duration> {
        (self.check_interval_secs > 0).then(|| Duration::from_secs(self.check_interval_secs))
    }
}

impl ServiceSettings {
    /// Load settings using the file named by `MODEL_MONITOR_CONFIG`, if set
    pub fn load() -> Result<Self, ServiceError> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(path.as_deref())
    }

    /// Load settings from an optional file path plus the environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: Option<&str>) -> Result<Self, ServiceError> {
        let settings = Config::builder()
            .add_source(Config::try_from(&ServiceSettings::default())?)
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_NAME)).required(false))
            .add_source(
                Environment::with_prefix("MODEL_MONITOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: ServiceSettings = settings.try_deserialize()?;
        settings.logging.max_level()?;
        Ok(settings)
    }
}
