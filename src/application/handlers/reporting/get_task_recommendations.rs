//! GetTaskRecommendationsHandler - categories worth rebalancing, largest gap first.

use std::sync::Arc;

use super::errors::load_or_fresh;
use super::ReportingError;
use crate::domain::foundation::FamilyId;
use crate::domain::rating::{ImbalanceAnalyzer, TaskRecommendation};
use crate::ports::RatingStore;

#[derive(Debug, Clone)]
pub struct GetTaskRecommendationsQuery {
    pub family_id: FamilyId,
}

pub struct GetTaskRecommendationsHandler {
    ratings: Arc<dyn RatingStore>,
    analyzer: ImbalanceAnalyzer,
}

impl GetTaskRecommendationsHandler {
    pub fn new(ratings: Arc<dyn RatingStore>, analyzer: ImbalanceAnalyzer) -> Self {
        Self { ratings, analyzer }
    }

    pub async fn handle(&self, query: GetTaskRecommendationsQuery) -> Result<Vec<TaskRecommendation>, ReportingError> {
        let ratings = load_or_fresh(self.ratings.as_ref(), &query.family_id).await?;
        Ok(self.analyzer.recommendations(&self.analyzer.analyze(&ratings)))
    }
}
