//! GetBalanceMetricsHandler - Query handler for a family's harmony metrics.
//!
//! Recomputes tallies, balances and harmony from the full response set on
//! every call. With a `BalanceCache` configured, results computed from an
//! identical response set and weight lookup are reused.

use std::sync::Arc;
use tracing::{debug, warn};

use super::ReportingError;
use crate::domain::balance::{BalanceCalculator, ContentHash, HarmonyComposer, HarmonyMetrics};
use crate::domain::foundation::FamilyId;
use crate::domain::survey::{SurveyResponse, TallyAggregator};
use crate::ports::{BalanceCache, SurveyResponseReader};

#[derive(Debug, Clone)]
pub struct GetBalanceMetricsQuery {
    pub family_id: FamilyId,
}

pub type GetBalanceMetricsResult = HarmonyMetrics;

pub struct GetBalanceMetricsHandler {
    survey: Arc<dyn SurveyResponseReader>,
    aggregator: TallyAggregator,
    cache: Option<Arc<dyn BalanceCache>>,
}

impl GetBalanceMetricsHandler {
    pub fn new(survey: Arc<dyn SurveyResponseReader>, aggregator: TallyAggregator) -> Self {
        Self {
            survey,
            aggregator,
            cache: None,
        }
    }

    /// Enables caching through the given cache.
    pub fn with_cache(mut self, cache: Arc<dyn BalanceCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub async fn handle(&self, query: GetBalanceMetricsQuery) -> Result<GetBalanceMetricsResult, ReportingError> {
        let Some(cache) = &self.cache else {
            let responses = self.survey.responses(&query.family_id).await?;
            return Ok(self.compute(&responses));
        };

        let (responses, weights) = futures::try_join!(
            self.survey.responses(&query.family_id),
            self.survey.question_weights(&query.family_id),
        )?;
        let hash = ContentHash::of(&responses, &weights);

        match cache.get(&query.family_id, &hash).await {
            Ok(Some(metrics)) => {
                debug!(family_id = %query.family_id, hash = %hash, "Balance cache hit");
                return Ok(metrics);
            }
            Ok(None) => {}
            Err(e) => warn!(family_id = %query.family_id, error = %e, "Balance cache read failed"),
        }

        let metrics = self.compute(&responses);
        if let Err(e) = cache.put(&query.family_id, hash, metrics).await {
            warn!(family_id = %query.family_id, error = %e, "Balance cache write failed");
        }
        Ok(metrics)
    }

    fn compute(&self, responses: &[SurveyResponse]) -> HarmonyMetrics {
        let tallies = self.aggregator.aggregate(responses);
        let balances = BalanceCalculator::balance_all(&tallies);
        HarmonyComposer::compose(&balances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryBalanceCache, InMemorySurveyStore};
    use crate::domain::foundation::Percentage;
    use crate::domain::survey::QuestionWeights;
    use crate::ports::BalanceCacheError;
    use async_trait::async_trait;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementation
    // ─────────────────────────────────────────────────────────────────────

    struct BrokenCache;

    #[async_trait]
    impl BalanceCache for BrokenCache {
        async fn get(&self, _f: &FamilyId, _h: &ContentHash) -> Result<Option<HarmonyMetrics>, BalanceCacheError> {
            Err(BalanceCacheError::Unavailable("offline".to_string()))
        }

        async fn put(&self, _f: &FamilyId, _h: ContentHash, _m: HarmonyMetrics) -> Result<(), BalanceCacheError> {
            Err(BalanceCacheError::Unavailable("offline".to_string()))
        }

        async fn invalidate(&self, _f: &FamilyId) -> Result<(), BalanceCacheError> {
            Ok(())
        }
    }

    fn family() -> FamilyId {
        FamilyId::new("family-1").unwrap()
    }

    fn query() -> GetBalanceMetricsQuery {
        GetBalanceMetricsQuery { family_id: family() }
    }

    async fn seeded_store() -> Arc<InMemorySurveyStore> {
        let store = Arc::new(InMemorySurveyStore::new());
        let mut responses: Vec<SurveyResponse> =
            (1..=15).map(|n| SurveyResponse::new(format!("q{}", n), "Mama")).collect();
        responses.extend((16..=18).map(|n| SurveyResponse::new(format!("q{}", n), "Papa")));
        store.replace_responses(&family(), responses).await;
        store
    }

    #[tokio::test]
    async fn empty_family_is_neutral() {
        let handler = GetBalanceMetricsHandler::new(Arc::new(InMemorySurveyStore::new()), TallyAggregator::default());
        assert_eq!(handler.handle(query()).await.unwrap(), HarmonyMetrics::neutral());
    }

    #[tokio::test]
    async fn skewed_visible_household_lowers_task_balance() {
        let handler = GetBalanceMetricsHandler::new(seeded_store().await, TallyAggregator::default());
        let metrics = handler.handle(query()).await.unwrap();

        // VH balance 33, others neutral: 0.2*33 + 0.3*50 + 0.2*50 + 0.3*50 = 46.6
        assert_eq!(metrics.task_balance, Percentage::new(47));
        assert_eq!(metrics.emotional_load, Percentage::NEUTRAL);
    }

    #[tokio::test]
    async fn cached_and_uncached_results_agree() {
        let store = seeded_store().await;
        let cache = Arc::new(InMemoryBalanceCache::new());
        let plain = GetBalanceMetricsHandler::new(store.clone(), TallyAggregator::default());
        let cached = GetBalanceMetricsHandler::new(store.clone(), TallyAggregator::default()).with_cache(cache.clone());

        let first = cached.handle(query()).await.unwrap();
        assert_eq!(cache.len().await, 1);
        let second = cached.handle(query()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, plain.handle(query()).await.unwrap());
    }

    #[tokio::test]
    async fn edited_responses_are_not_served_from_cache() {
        let store = seeded_store().await;
        let cache = Arc::new(InMemoryBalanceCache::new());
        let handler = GetBalanceMetricsHandler::new(store.clone(), TallyAggregator::default()).with_cache(cache.clone());

        let before = handler.handle(query()).await.unwrap();
        for n in 1..=6 {
            store.edit_answer(&family(), &format!("q{}", n), "Papa").await;
        }
        let after = handler.handle(query()).await.unwrap();

        assert_ne!(before, after);
        let hash = ContentHash::of(
            &store.responses(&family()).await.unwrap(),
            &QuestionWeights::new(),
        );
        assert_eq!(cache.get(&family(), &hash).await.unwrap(), Some(after));
    }

    #[tokio::test]
    async fn cache_failures_fall_back_to_recomputation() {
        let store = seeded_store().await;
        let handler = GetBalanceMetricsHandler::new(store.clone(), TallyAggregator::default()).with_cache(Arc::new(BrokenCache));
        let plain = GetBalanceMetricsHandler::new(store, TallyAggregator::default());
        assert_eq!(handler.handle(query()).await.unwrap(), plain.handle(query()).await.unwrap());
    }
}
