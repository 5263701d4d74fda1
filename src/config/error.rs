//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("Wizard must have at least one step")]
    InvalidTotalSteps,

    #[error("Display limit must be at least 1")]
    InvalidDisplayLimit,

    #[error("No SALIC proxy configured")]
    NoProxiesConfigured,

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}
