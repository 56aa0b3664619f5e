//! Service Error Types

use thiserror::Error;

/// Errors raised while configuring or running the service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Settings could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Listener or server I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bind address did not parse as a socket address
    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    /// Log level is not one of trace, debug, info, warn or error
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Prometheus recorder could not be installed
    #[error("Metrics exporter error: {0}")]
    Metrics(String),
}
