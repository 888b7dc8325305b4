//! Logging configuration and tracing bootstrap

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::{LoggingError, ValidationError};

/// Log filter and output format
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info,family_balance=debug".to_string()
}

impl LoggingConfig {
    /// Validate the filter directive
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Installs the global `fmt` subscriber.
///
/// Returns `LoggingError::AlreadyInitialized` instead of panicking when a
/// subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_valid() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info,family_balance=debug");
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let config = LoggingConfig {
            level: "family_balance=notalevel".to_string(),
            json: false,
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidLogFilter(_))));
    }

    #[test]
    fn second_install_reports_error() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(LoggingError::AlreadyInitialized(_))
        ));
    }
}
