//! GetTaskImbalancesHandler - Query handler for per-task rating imbalances.

use std::sync::Arc;

use super::errors::load_or_fresh;
use super::ReportingError;
use crate::domain::foundation::FamilyId;
use crate::domain::rating::{ImbalanceAnalyzer, TaskImbalance};
use crate::domain::survey::Category;
use crate::ports::RatingStore;

#[derive(Debug, Clone)]
pub struct GetTaskImbalancesQuery {
    pub family_id: FamilyId,
    /// Only tasks in this category, when set.
    pub category: Option<Category>,
}

impl GetTaskImbalancesQuery {
    pub fn new(family_id: FamilyId) -> Self {
        Self {
            family_id,
            category: None,
        }
    }

    pub fn in_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// Lists answered tasks, largest rating gap first.
pub struct GetTaskImbalancesHandler {
    ratings: Arc<dyn RatingStore>,
    analyzer: ImbalanceAnalyzer,
}

impl GetTaskImbalancesHandler {
    pub fn new(ratings: Arc<dyn RatingStore>, analyzer: ImbalanceAnalyzer) -> Self {
        Self { ratings, analyzer }
    }

    pub async fn handle(&self, query: GetTaskImbalancesQuery) -> Result<Vec<TaskImbalance>, ReportingError> {
        let ratings = load_or_fresh(self.ratings.as_ref(), &query.family_id).await?;
        Ok(self.analyzer.task_imbalances(&ratings, query.category))
    }
}
