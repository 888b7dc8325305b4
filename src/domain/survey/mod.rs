//! Survey Module - from raw answers to per-category tallies.
//!
//! # Components
//!
//! - `Category` / `ClassificationTable` - workload categories and ordinal ranges
//! - `QuestionClassifier` - question key → category
//! - `normalize_answer` - free text → `Answer`
//! - `TallyAggregator` - responses → `CategoryTally` per category
//! - `TaskWeight` / `TaskWeightCalculator` - question burden weights

mod answer;
mod category;
mod classifier;
mod response;
mod tally;
mod task_weight;

pub use answer::{normalize_answer, Answer};
pub use category::{Category, CategoryRange, ClassificationTable};
pub use classifier::{extract_ordinal, QuestionClassifier};
pub use response::SurveyResponse;
pub use tally::{CategoryTally, TallyAggregator, WeightedTally};
pub use task_weight::{
    EmotionalLabor, Frequency, Invisibility, QuestionWeights, TaskProfile, TaskWeight,
    TaskWeightCalculator,
};
