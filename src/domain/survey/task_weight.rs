//! Task weights - how burdensome a question's task is, on a 1-10 scale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use super::Category;
use crate::domain::foundation::ValidationError;

/// Burden weight of a task, always within `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskWeight(f64);

impl TaskWeight {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 10.0;

    /// The neutral weight used when a question has none.
    pub const NEUTRAL: Self = Self(5.0);

    /// Creates a weight, clamping into range. Non-finite input is neutral.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NEUTRAL;
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Creates a weight, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "task_weight",
                Self::MIN,
                Self::MAX,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Substitutes the neutral weight for a missing or non-finite value.
    pub fn or_neutral(value: Option<f64>) -> Self {
        value.map(Self::new).unwrap_or(Self::NEUTRAL)
    }

    /// Parses a stored weight. Non-numeric text yields the neutral weight.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) => Self::new(value),
            Err(_) => {
                warn!(raw = raw, "Unparseable task weight, using neutral weight");
                Self::NEUTRAL
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for TaskWeight {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for TaskWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// `questionId -> weight` lookup with a fallback for unweighted questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionWeights {
    weights: BTreeMap<String, TaskWeight>,
    default_weight: TaskWeight,
}

impl QuestionWeights {
    /// An empty lookup falling back to the neutral weight.
    pub fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
            default_weight: TaskWeight::NEUTRAL,
        }
    }

    /// Replaces the fallback weight.
    pub fn with_default(mut self, default_weight: TaskWeight) -> Self {
        self.default_weight = default_weight;
        self
    }

    pub fn insert(&mut self, question_id: impl Into<String>, weight: TaskWeight) {
        self.weights.insert(question_id.into(), weight);
    }

    /// Returns the weight for a question, or the fallback.
    pub fn weight_for(&self, question_id: &str) -> TaskWeight {
        self.weights
            .get(question_id)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Iterates entries in question-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TaskWeight)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn default_weight(&self) -> TaskWeight {
        self.default_weight
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for QuestionWeights {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>> FromIterator<(K, TaskWeight)> for QuestionWeights {
    fn from_iter<I: IntoIterator<Item = (K, TaskWeight)>>(iter: I) -> Self {
        let mut weights = Self::new();
        for (question_id, weight) in iter {
            weights.insert(question_id, weight);
        }
        weights
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Weight derivation from task characteristics
// ════════════════════════════════════════════════════════════════════════════════

/// How often a task recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    /// Several times a week.
    Several,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    Seasonal,
}

impl Frequency {
    pub fn multiplier(&self) -> f64 {
        match self {
            Frequency::Daily => 1.5,
            Frequency::Several => 1.3,
            Frequency::Weekly => 1.2,
            Frequency::Monthly => 1.0,
            Frequency::Quarterly => 0.8,
            Frequency::Yearly => 0.7,
            Frequency::Seasonal => 0.9,
        }
    }
}

/// How hidden the task is from the rest of the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Invisibility {
    /// Highly visible.
    Highly,
    Partially,
    Mostly,
    Completely,
}

impl Invisibility {
    pub fn multiplier(&self) -> f64 {
        match self {
            Invisibility::Highly => 1.0,
            Invisibility::Partially => 1.2,
            Invisibility::Mostly => 1.35,
            Invisibility::Completely => 1.5,
        }
    }
}

/// Emotional cost of carrying the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalLabor {
    Minimal,
    Low,
    Moderate,
    High,
    Extreme,
}

impl EmotionalLabor {
    pub fn multiplier(&self) -> f64 {
        match self {
            EmotionalLabor::Minimal => 1.0,
            EmotionalLabor::Low => 1.1,
            EmotionalLabor::Moderate => 1.2,
            EmotionalLabor::High => 1.3,
            EmotionalLabor::Extreme => 1.4,
        }
    }
}

/// Characteristics of a task used to derive its weight.
///
/// Missing characteristics contribute a multiplier of 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProfile {
    pub base_weight: Option<f64>,
    pub frequency: Option<Frequency>,
    pub invisibility: Option<Invisibility>,
    pub emotional_labor: Option<EmotionalLabor>,
    pub category: Option<Category>,
}

/// Derives task weights from task profiles.
pub struct TaskWeightCalculator;

impl TaskWeightCalculator {
    /// Base weight when a profile does not set one.
    pub const DEFAULT_BASE_WEIGHT: f64 = 3.0;

    /// Category burden multiplier.
    pub fn category_multiplier(category: Category) -> f64 {
        match category {
            Category::VisibleHousehold => 1.0,
            Category::InvisibleHousehold => 1.2,
            Category::VisibleParenting => 1.1,
            Category::InvisibleParenting => 1.5,
        }
    }

    /// Product of the base weight and every multiplier, before clamping.
    pub fn raw_weight(profile: &TaskProfile) -> f64 {
        let base = profile
            .base_weight
            .filter(|b| b.is_finite() && *b > 0.0)
            .unwrap_or(Self::DEFAULT_BASE_WEIGHT);

        base * profile.frequency.map_or(1.0, |f| f.multiplier())
            * profile.invisibility.map_or(1.0, |i| i.multiplier())
            * profile.emotional_labor.map_or(1.0, |e| e.multiplier())
            * profile.category.map_or(1.0, Self::category_multiplier)
    }

    /// Weight of a task, clamped into `[1, 10]`.
    pub fn calculate(profile: &TaskProfile) -> TaskWeight {
        TaskWeight::new(Self::raw_weight(profile))
    }
}
