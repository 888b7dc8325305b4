//! Match records - the audit trail of every applied match.

use serde::{Deserialize, Serialize};

use super::{MatchOutcome, RatingPair, RatingScope};
use crate::domain::foundation::{MatchId, Parent, Timestamp};
use crate::domain::survey::Category;

/// Ratings of one scope before and after a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub scope: RatingScope,
    pub mama_before: f64,
    pub papa_before: f64,
    pub mama_after: f64,
    pub papa_after: f64,
}

impl RatingChange {
    pub(crate) fn between(before: &RatingPair, after: &RatingPair) -> Self {
        Self {
            scope: after.scope().clone(),
            mama_before: before.mama.value,
            papa_before: before.papa.value,
            mama_after: after.mama.value,
            papa_after: after.papa.value,
        }
    }

    pub fn mama_delta(&self) -> f64 {
        self.mama_after - self.mama_before
    }

    pub fn papa_delta(&self) -> f64 {
        self.papa_after - self.papa_before
    }
}

/// One applied match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub question_id: String,
    pub category: Category,
    pub outcome: MatchOutcome,
    /// Weight actually used, after neutral substitution.
    pub weight: f64,
    pub multiplier: f64,
    pub expected_mama: f64,
    pub expected_papa: f64,
    pub task_change: RatingChange,
    pub category_change: RatingChange,
    pub global_change: RatingChange,
    pub recorded_at: Timestamp,
}

impl MatchRecord {
    pub fn winner(&self) -> Option<Parent> {
        self.outcome.winner()
    }

    /// How far the category ratings moved, in rating points.
    pub fn impact(&self) -> f64 {
        self.category_change.mama_delta().abs()
    }
}
