//! Rating module - Mama/Papa ELO ratings per task, per category and globally.
//!
//! # Components
//!
//! - `RatingPair` / `Rating` - the pair of ratings kept for each scope
//! - `EloCalculator` - expected scores and weight-scaled deltas
//! - `RatingEngine` - applies a match to a family's `FamilyRatings`
//! - `TaskRatings` - per-task pair plus shared and uncovered answer counts
//! - `MatchRecord` - history entry produced by every applied match
//! - `ImbalanceAnalyzer` - rating gaps, confidence, recommendations
//! - `WeightStatistics` - who carries the heavy tasks

mod elo;
mod engine;
mod imbalance;
mod match_record;
mod rating;
mod settings;
mod weight_stats;

pub use elo::{EloCalculator, EloUpdate, MatchOutcome, NEUTRAL_MATCH_WEIGHT};
pub use engine::{FamilyRatings, RatingEngine, TaskRatings};
pub use imbalance::{
    CategoryImbalance, ImbalanceAnalyzer, ImbalanceSeverity, TaskImbalance, TaskRecommendation,
    UncoveredTask, UncoveredTasks,
};
pub use match_record::{MatchRecord, RatingChange};
pub use rating::{Rating, RatingPair, RatingScope};
pub use settings::{
    RatingSettings, DEFAULT_CONFIDENCE_HORIZON, DEFAULT_HIGH_WEIGHT_THRESHOLD, DEFAULT_K_FACTOR,
    DEFAULT_TIE_BAND, INITIAL_RATING,
};
pub use weight_stats::{ParentCounts, ParentTotals, WeightStatistics};
