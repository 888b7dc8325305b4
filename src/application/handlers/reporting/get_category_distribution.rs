//! GetCategoryDistributionHandler - who carries how much of each category.
//!
//! Unlike balance scores this view is directional, and it sums question
//! weights rather than answer counts.

use futures::try_join;
use std::sync::Arc;

use super::ReportingError;
use crate::domain::balance::{BalanceCalculator, CategoryDistribution};
use crate::domain::foundation::FamilyId;
use crate::domain::survey::TallyAggregator;
use crate::ports::SurveyResponseReader;

#[derive(Debug, Clone)]
pub struct GetCategoryDistributionQuery {
    pub family_id: FamilyId,
}

/// One entry per category, in category order.
pub type GetCategoryDistributionResult = Vec<CategoryDistribution>;

pub struct GetCategoryDistributionHandler {
    survey: Arc<dyn SurveyResponseReader>,
    aggregator: TallyAggregator,
}

impl GetCategoryDistributionHandler {
    pub fn new(survey: Arc<dyn SurveyResponseReader>, aggregator: TallyAggregator) -> Self {
        Self { survey, aggregator }
    }

    pub async fn handle(
        &self,
        query: GetCategoryDistributionQuery,
    ) -> Result<GetCategoryDistributionResult, ReportingError> {
        let (responses, weights) = try_join!(
            self.survey.responses(&query.family_id),
            self.survey.question_weights(&query.family_id),
        )?;

        Ok(self
            .aggregator
            .aggregate_weighted(&responses, &weights)
            .iter()
            .map(BalanceCalculator::distribution)
            .collect())
    }
}
