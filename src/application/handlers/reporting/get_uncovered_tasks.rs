//! GetUncoveredTasksHandler - Query handler for tasks nobody does.

use std::sync::Arc;

use super::errors::load_or_fresh;
use super::ReportingError;
use crate::domain::foundation::FamilyId;
use crate::domain::rating::{ImbalanceAnalyzer, UncoveredTasks};
use crate::ports::RatingStore;

#[derive(Debug, Clone)]
pub struct GetUncoveredTasksQuery {
    pub family_id: FamilyId,
}

pub struct GetUncoveredTasksHandler {
    ratings: Arc<dyn RatingStore>,
    analyzer: ImbalanceAnalyzer,
}

impl GetUncoveredTasksHandler {
    pub fn new(ratings: Arc<dyn RatingStore>, analyzer: ImbalanceAnalyzer) -> Self {
        Self { ratings, analyzer }
    }

    pub async fn handle(&self, query: GetUncoveredTasksQuery) -> Result<UncoveredTasks, ReportingError> {
        let ratings = load_or_fresh(self.ratings.as_ref(), &query.family_id).await?;
        Ok(self.analyzer.uncovered_tasks(&ratings))
    }
}
