//! ELO Calculator - expected scores and weight-scaled rating deltas.
//!
//! Standard ELO with the K-factor scaled by the question's task weight:
//! a weight-10 task moves ratings twice as far as a weight-5 task.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Parent;
use crate::domain::survey::Answer;

/// Lower and upper bound of the weight multiplier.
const MULTIPLIER_RANGE: (f64, f64) = (0.5, 2.0);

/// Weight at which the multiplier is exactly 1.
pub const NEUTRAL_MATCH_WEIGHT: f64 = 5.0;

/// Result of one match between Mama and Papa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    MamaWins,
    PapaWins,
    Tie,
}

impl MatchOutcome {
    /// Maps a normalized answer; `Unknown` is not a match.
    pub fn from_answer(answer: Answer) -> Option<Self> {
        match answer {
            Answer::Mama => Some(MatchOutcome::MamaWins),
            Answer::Papa => Some(MatchOutcome::PapaWins),
            Answer::Both => Some(MatchOutcome::Tie),
            Answer::Neither | Answer::Unknown => None,
        }
    }

    /// Actual scores `(Sm, Sp)`.
    pub fn actual_scores(&self) -> (f64, f64) {
        match self {
            MatchOutcome::MamaWins => (1.0, 0.0),
            MatchOutcome::PapaWins => (0.0, 1.0),
            MatchOutcome::Tie => (0.5, 0.5),
        }
    }

    pub fn winner(&self) -> Option<Parent> {
        match self {
            MatchOutcome::MamaWins => Some(Parent::Mama),
            MatchOutcome::PapaWins => Some(Parent::Papa),
            MatchOutcome::Tie => None,
        }
    }
}

/// Expected scores and deltas for one match in one scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloUpdate {
    pub expected_mama: f64,
    pub expected_papa: f64,
    pub mama_delta: f64,
    pub papa_delta: f64,
}

/// Stateless ELO arithmetic.
pub struct EloCalculator;

impl EloCalculator {
    /// Probability that the player rated `rating` beats one rated `opponent`.
    pub fn expected_score(rating: f64, opponent: f64) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
    }

    /// `1 + (weight - 5) / 5`, clamped to `[0.5, 2.0]`.
    ///
    /// A missing or non-finite weight is treated as neutral (multiplier 1).
    pub fn weight_multiplier(weight: Option<f64>) -> f64 {
        let weight = match weight {
            Some(w) if w.is_finite() => w,
            _ => NEUTRAL_MATCH_WEIGHT,
        };
        let (lo, hi) = MULTIPLIER_RANGE;
        (1.0 + (weight - NEUTRAL_MATCH_WEIGHT) / NEUTRAL_MATCH_WEIGHT).clamp(lo, hi)
    }

    /// Computes the rating change for both sides.
    pub fn update(
        mama_rating: f64,
        papa_rating: f64,
        outcome: MatchOutcome,
        k_factor: f64,
        multiplier: f64,
    ) -> EloUpdate {
        let expected_mama = Self::expected_score(mama_rating, papa_rating);
        let expected_papa = 1.0 - expected_mama;
        let (actual_mama, actual_papa) = outcome.actual_scores();
        let k = k_factor * multiplier;

        EloUpdate {
            expected_mama,
            expected_papa,
            mama_delta: k * (actual_mama - expected_mama),
            papa_delta: k * (actual_papa - expected_papa),
        }
    }
}
