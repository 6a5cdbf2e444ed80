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
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Storage data directory must not be empty for the file backend")]
    MissingDataDir,

    #[error("Invalid rate `{0}`: must be a finite, non-negative number")]
    InvalidRate(&'static str),

    #[error("Invalid horizon `{0}`: must be at least one year")]
    InvalidHorizon(&'static str),

    #[error("Default `{0}` exceeds its configured maximum")]
    DefaultAboveLimit(&'static str),
}
