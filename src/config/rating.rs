//! Rating engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::rating::{
    RatingSettings, DEFAULT_CONFIDENCE_HORIZON, DEFAULT_HIGH_WEIGHT_THRESHOLD, DEFAULT_K_FACTOR,
    DEFAULT_TIE_BAND, INITIAL_RATING,
};
use crate::domain::survey::TaskWeight;

/// Rating constants and the fallback question weight
#[derive(Debug, Clone, Deserialize)]
pub struct RatingConfig {
    /// Base K-factor of a weight-5 match
    #[serde(default = "default_k_factor")]
    pub k_factor: f64,

    /// Starting rating of both parents
    #[serde(default = "default_initial_rating")]
    pub initial_rating: f64,

    /// Rating gap within which no parent leads
    #[serde(default = "default_tie_band")]
    pub tie_band: f64,

    /// Matches needed for full confidence
    #[serde(default = "default_confidence_horizon")]
    pub confidence_horizon: u32,

    /// Weights above this count as high-weight
    #[serde(default = "default_high_weight_threshold")]
    pub high_weight_threshold: f64,

    /// Weight of questions without one
    #[serde(default = "default_neutral_weight")]
    pub neutral_weight: f64,
}

fn default_k_factor() -> f64 {
    DEFAULT_K_FACTOR
}

fn default_initial_rating() -> f64 {
    INITIAL_RATING
}

fn default_tie_band() -> f64 {
    DEFAULT_TIE_BAND
}

fn default_confidence_horizon() -> u32 {
    DEFAULT_CONFIDENCE_HORIZON
}

fn default_high_weight_threshold() -> f64 {
    DEFAULT_HIGH_WEIGHT_THRESHOLD
}

fn default_neutral_weight() -> f64 {
    TaskWeight::NEUTRAL.value()
}

impl RatingConfig {
    /// Domain settings for the engine and analyzer
    pub fn settings(&self) -> RatingSettings {
        RatingSettings {
            k_factor: self.k_factor,
            initial_rating: self.initial_rating,
            tie_band: self.tie_band,
            confidence_horizon: self.confidence_horizon,
            high_weight_threshold: self.high_weight_threshold,
        }
    }

    /// Fallback weight for the question weight lookup
    pub fn neutral_weight(&self) -> TaskWeight {
        TaskWeight::new(self.neutral_weight)
    }

    /// Validate rating configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.k_factor.is_finite() && self.k_factor > 0.0) {
            return Err(ValidationError::InvalidKFactor);
        }
        if !(self.initial_rating.is_finite() && self.initial_rating > 0.0) {
            return Err(ValidationError::InvalidInitialRating);
        }
        if !(self.tie_band.is_finite() && self.tie_band >= 0.0) {
            return Err(ValidationError::InvalidTieBand);
        }
        if self.confidence_horizon == 0 {
            return Err(ValidationError::InvalidConfidenceHorizon);
        }
        if !(1.0..=10.0).contains(&self.high_weight_threshold) {
            return Err(ValidationError::WeightOutOfRange("high_weight_threshold"));
        }
        if !(1.0..=10.0).contains(&self.neutral_weight) {
            return Err(ValidationError::WeightOutOfRange("neutral_weight"));
        }
        Ok(())
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: default_k_factor(),
            initial_rating: default_initial_rating(),
            tie_band: default_tie_band(),
            confidence_horizon: default_confidence_horizon(),
            high_weight_threshold: default_high_weight_threshold(),
            neutral_weight: default_neutral_weight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_settings() {
        let config = RatingConfig::default();
        assert_eq!(config.settings(), RatingSettings::default());
        assert_eq!(config.neutral_weight(), TaskWeight::NEUTRAL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let bad_k = RatingConfig { k_factor: 0.0, ..RatingConfig::default() };
        assert!(matches!(bad_k.validate(), Err(ValidationError::InvalidKFactor)));

        let bad_band = RatingConfig { tie_band: -1.0, ..RatingConfig::default() };
        assert!(matches!(bad_band.validate(), Err(ValidationError::InvalidTieBand)));

        let bad_horizon = RatingConfig { confidence_horizon: 0, ..RatingConfig::default() };
        assert!(matches!(bad_horizon.validate(), Err(ValidationError::InvalidConfidenceHorizon)));

        let bad_weight = RatingConfig { neutral_weight: 11.0, ..RatingConfig::default() };
        assert!(matches!(
            bad_weight.validate(),
            Err(ValidationError::WeightOutOfRange("neutral_weight"))
        ));
    }

    #[test]
    fn partial_deserialization_keeps_defaults() {
        let config: RatingConfig = serde_json::from_str(r#"{ "k_factor": 24.0 }"#).unwrap();
        assert_eq!(config.k_factor, 24.0);
        assert_eq!(config.tie_band, 50.0);
        assert_eq!(config.confidence_horizon, 20);
    }
}
