//! GetWeightStatisticsHandler - Query handler for weight-based load statistics.

use std::sync::Arc;

use super::ReportingError;
use crate::domain::foundation::FamilyId;
use crate::domain::rating::WeightStatistics;
use crate::ports::MatchHistory;

#[derive(Debug, Clone)]
pub struct GetWeightStatisticsQuery {
    pub family_id: FamilyId,
}

pub struct GetWeightStatisticsHandler {
    history: Arc<dyn MatchHistory>,
    high_weight_threshold: f64,
}

impl GetWeightStatisticsHandler {
    pub fn new(history: Arc<dyn MatchHistory>, high_weight_threshold: f64) -> Self {
        Self {
            history,
            high_weight_threshold,
        }
    }

    pub async fn handle(&self, query: GetWeightStatisticsQuery) -> Result<WeightStatistics, ReportingError> {
        let matches = self.history.all(&query.family_id).await?;
        Ok(WeightStatistics::from_matches(&matches, self.high_weight_threshold))
    }
}
