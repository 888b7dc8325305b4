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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid classification table: {0}")]
    InvalidClassification(String),

    #[error("K-factor must be positive")]
    InvalidKFactor,

    #[error("Initial rating must be positive")]
    InvalidInitialRating,

    #[error("Tie band must not be negative")]
    InvalidTieBand,

    #[error("Confidence horizon must be at least 1")]
    InvalidConfidenceHorizon,

    #[error("{0} must be within [1, 10]")]
    WeightOutOfRange(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}

/// Errors that can occur while installing the tracing subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}
