//! GetCategoryImbalancesHandler - Query handler for per-category rating imbalances.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::errors::load_or_fresh;
use super::ReportingError;
use crate::domain::foundation::{FamilyId, Percentage};
use crate::domain::rating::{CategoryImbalance, ImbalanceAnalyzer};
use crate::domain::survey::Category;
use crate::ports::RatingStore;

#[derive(Debug, Clone)]
pub struct GetCategoryImbalancesQuery {
    pub family_id: FamilyId,
}

/// Imbalance of every category plus the rating-derived distribution score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImbalanceReport {
    pub imbalances: BTreeMap<Category, CategoryImbalance>,
    pub task_distribution_score: Percentage,
}

pub struct GetCategoryImbalancesHandler {
    ratings: Arc<dyn RatingStore>,
    analyzer: ImbalanceAnalyzer,
}

impl GetCategoryImbalancesHandler {
    pub fn new(ratings: Arc<dyn RatingStore>, analyzer: ImbalanceAnalyzer) -> Self {
        Self { ratings, analyzer }
    }

    pub async fn handle(&self, query: GetCategoryImbalancesQuery) -> Result<CategoryImbalanceReport, ReportingError> {
        let ratings = load_or_fresh(self.ratings.as_ref(), &query.family_id).await?;
        let imbalances = self.analyzer.analyze(&ratings);
        let task_distribution_score = self.analyzer.task_distribution_score(&imbalances);
        Ok(CategoryImbalanceReport {
            imbalances,
            task_distribution_score,
        })
    }
}
