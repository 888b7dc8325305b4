//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FAMILY_BALANCE` prefix and nested values use double underscores as separators.
//! Every field has a default, so an empty environment yields the reference
//! configuration.
//!
//! # Example
//!
//! ```no_run
//! use family_balance::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging).expect("Failed to install tracing");
//! ```

mod classification;
mod error;
mod features;
mod logging;
mod rating;

pub use classification::{ClassificationConfig, RangeConfig};
pub use error::{ConfigError, LoggingError, ValidationError};
pub use features::FeatureFlags;
pub use logging::{init_tracing, LoggingConfig};
pub use rating::RatingConfig;

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::application::handlers::reporting::GetBalanceMetricsHandler;
use crate::domain::rating::{ImbalanceAnalyzer, RatingEngine};
use crate::domain::survey::{QuestionClassifier, TallyAggregator};
use crate::ports::{BalanceCache, SurveyResponseReader};

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Question id ranges per category
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Rating constants
    #[serde(default)]
    pub rating: RatingConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FAMILY_BALANCE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FAMILY_BALANCE__RATING__K_FACTOR=24` -> `rating.k_factor = 24`
    /// - `FAMILY_BALANCE__CLASSIFICATION__WRAP_BEYOND_LAST=true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables on top
    ///
    /// The format (TOML, YAML, JSON, ...) follows the file extension.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix("FAMILY_BALANCE")
            .separator("__")
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.classification.validate()?;
        self.rating.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Classifier over the configured table
    pub fn classifier(&self) -> Result<QuestionClassifier, ValidationError> {
        Ok(QuestionClassifier::new(self.classification.table()?))
    }

    /// Tally aggregator over the configured table
    pub fn aggregator(&self) -> Result<TallyAggregator, ValidationError> {
        Ok(TallyAggregator::new(self.classifier()?))
    }

    pub fn rating_engine(&self) -> RatingEngine {
        RatingEngine::new(self.rating.settings())
    }

    pub fn imbalance_analyzer(&self) -> ImbalanceAnalyzer {
        ImbalanceAnalyzer::new(self.rating.settings())
    }

    /// Balance metrics handler; `cache` is attached only when
    /// `features.enable_balance_cache` is set.
    pub fn balance_metrics_handler(
        &self,
        survey: Arc<dyn SurveyResponseReader>,
        cache: Arc<dyn BalanceCache>,
    ) -> Result<GetBalanceMetricsHandler, ValidationError> {
        let handler = GetBalanceMetricsHandler::new(survey, self.aggregator()?);
        if self.features.enable_balance_cache {
            Ok(handler.with_cache(cache))
        } else {
            Ok(handler)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::Category;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("FAMILY_BALANCE__RATING__K_FACTOR");
        env::remove_var("FAMILY_BALANCE__RATING__TIE_BAND");
        env::remove_var("FAMILY_BALANCE__CLASSIFICATION__WRAP_BEYOND_LAST");
        env::remove_var("FAMILY_BALANCE__FEATURES__ENABLE_BALANCE_CACHE");
        env::remove_var("FAMILY_BALANCE__LOGGING__JSON");
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.rating.k_factor, 16.0);
        assert_eq!(config.rating.initial_rating, 1500.0);
        assert!(!config.classification.wrap_beyond_last);
        assert!(!config.features.enable_balance_cache);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FAMILY_BALANCE__RATING__K_FACTOR", "24");
        env::set_var("FAMILY_BALANCE__CLASSIFICATION__WRAP_BEYOND_LAST", "true");
        env::set_var("FAMILY_BALANCE__FEATURES__ENABLE_BALANCE_CACHE", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.rating.k_factor, 24.0);
        assert!(config.classification.wrap_beyond_last);
        assert!(config.features.enable_balance_cache);
        assert_eq!(config.classifier().unwrap().classify("q73"), Some(Category::VisibleHousehold));
    }

    #[test]
    fn test_load_from_file_with_env_on_top() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[rating]
k_factor = 32.0
tie_band = 25.0

[[classification.ranges]]
category = "visible_household"
start = 1
end = 37

[[classification.ranges]]
category = "invisible_parenting"
start = 37
end = 73
"#
        )
        .unwrap();

        env::set_var("FAMILY_BALANCE__RATING__TIE_BAND", "75");
        let result = AppConfig::load_from_file(file.path());
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.rating.k_factor, 32.0);
        assert_eq!(config.rating.tie_band, 75.0);
        assert!(config.validate().is_ok());
        let classifier = config.classifier().unwrap();
        assert_eq!(classifier.classify("q20"), Some(Category::VisibleHousehold));
        assert_eq!(classifier.classify("q40"), Some(Category::InvisibleParenting));
    }

    #[test]
    fn test_validate_rejects_bad_rating() {
        let mut config = AppConfig::default();
        config.rating.confidence_horizon = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfidenceHorizon)
        ));
    }

    #[test]
    fn test_builders_use_configured_settings() {
        let mut config = AppConfig::default();
        config.rating.k_factor = 20.0;
        assert_eq!(config.rating_engine().settings().k_factor, 20.0);
        assert!(config.aggregator().is_ok());
    }

    #[tokio::test]
    async fn test_balance_cache_follows_feature_flag() {
        use crate::adapters::memory::{InMemoryBalanceCache, InMemorySurveyStore};
        use crate::application::handlers::reporting::GetBalanceMetricsQuery;
        use crate::domain::foundation::FamilyId;
        use crate::domain::survey::SurveyResponse;

        let family_id = FamilyId::new("fam-cache").unwrap();
        let survey = Arc::new(InMemorySurveyStore::new());
        survey.record(&family_id, SurveyResponse::new("q1", "Mama")).await;

        for enabled in [false, true] {
            let mut config = AppConfig::default();
            config.features.enable_balance_cache = enabled;
            let cache = Arc::new(InMemoryBalanceCache::new());
            let handler = config.balance_metrics_handler(survey.clone(), cache.clone()).unwrap();

            handler
                .handle(GetBalanceMetricsQuery { family_id: family_id.clone() })
                .await
                .unwrap();
            assert_eq!(cache.len().await, usize::from(enabled));
        }
    }
}
