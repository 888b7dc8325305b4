//! Tunable rating constants.

use serde::{Deserialize, Serialize};

/// Base K-factor: the largest move a single weight-5 match can make.
pub const DEFAULT_K_FACTOR: f64 = 16.0;

/// Rating both parents start from.
pub const INITIAL_RATING: f64 = 1500.0;

/// Rating gap within which neither parent is said to lead.
pub const DEFAULT_TIE_BAND: f64 = 50.0;

/// Match count at which a category's confidence reaches 1.0.
pub const DEFAULT_CONFIDENCE_HORIZON: u32 = 20;

/// Weights strictly above this count as high-weight matches.
pub const DEFAULT_HIGH_WEIGHT_THRESHOLD: f64 = 7.0;

/// Constants shared by the rating engine and the imbalance analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSettings {
    pub k_factor: f64,
    pub initial_rating: f64,
    pub tie_band: f64,
    pub confidence_horizon: u32,
    pub high_weight_threshold: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            initial_rating: INITIAL_RATING,
            tie_band: DEFAULT_TIE_BAND,
            confidence_horizon: DEFAULT_CONFIDENCE_HORIZON,
            high_weight_threshold: DEFAULT_HIGH_WEIGHT_THRESHOLD,
        }
    }
}
