//! Rating values and the Mama/Papa pair they always travel in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Parent;
use crate::domain::survey::Category;

/// Where a rating applies: one task, one category, or across all of them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingScope {
    /// Keyed by question id.
    Task(String),
    Category(Category),
    Global,
}

impl fmt::Display for RatingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingScope::Task(key) => write!(f, "task:{key}"),
            RatingScope::Category(c) => write!(f, "{}", c.key()),
            RatingScope::Global => write!(f, "global"),
        }
    }
}

/// One parent's rating within one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub subject: Parent,
    pub scope: RatingScope,
    /// Unrounded; use `display_value` for presentation.
    pub value: f64,
    pub match_count: u32,
}

impl Rating {
    pub fn initial(subject: Parent, scope: RatingScope, initial_rating: f64) -> Self {
        Self {
            subject,
            scope,
            value: initial_rating,
            match_count: 0,
        }
    }

    /// Rating rounded half-up to a whole number.
    pub fn display_value(&self) -> i64 {
        (self.value + 0.5).floor() as i64
    }
}

/// Mama and Papa ratings for one scope.
///
/// A pair is created and advanced as a unit; ratings are relative, so one
/// side never exists without the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPair {
    pub mama: Rating,
    pub papa: Rating,
}

impl RatingPair {
    /// A fresh pair at the initial rating with no matches.
    pub fn initial(scope: RatingScope, initial_rating: f64) -> Self {
        Self {
            mama: Rating::initial(Parent::Mama, scope.clone(), initial_rating),
            papa: Rating::initial(Parent::Papa, scope, initial_rating),
        }
    }

    pub fn scope(&self) -> &RatingScope {
        &self.mama.scope
    }

    pub fn get(&self, parent: Parent) -> &Rating {
        match parent {
            Parent::Mama => &self.mama,
            Parent::Papa => &self.papa,
        }
    }

    pub fn match_count(&self) -> u32 {
        self.mama.match_count
    }

    /// Absolute rating difference.
    pub fn gap(&self) -> f64 {
        (self.mama.value - self.papa.value).abs()
    }

    /// The parent rated higher, or `None` when the gap is within `tie_band`.
    pub fn leader(&self, tie_band: f64) -> Option<Parent> {
        let diff = self.mama.value - self.papa.value;
        if diff.abs() <= tie_band {
            None
        } else if diff > 0.0 {
            Some(Parent::Mama)
        } else {
            Some(Parent::Papa)
        }
    }

    /// Moves both ratings and counts one match for each side.
    pub(crate) fn advance(&mut self, mama_delta: f64, papa_delta: f64) {
        self.mama.value += mama_delta;
        self.papa.value += papa_delta;
        self.mama.match_count = self.mama.match_count.saturating_add(1);
        self.papa.match_count = self.papa.match_count.saturating_add(1);
    }
}
