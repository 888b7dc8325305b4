//! BalanceCache port - optional memoisation of harmony metrics.
//!
//! Entries are keyed by family and by the `ContentHash` of the inputs they
//! were computed from, so a stale entry can never be returned for changed
//! inputs. Caching never changes results.

use async_trait::async_trait;

use crate::domain::balance::{ContentHash, HarmonyMetrics};
use crate::domain::foundation::{DomainError, FamilyId};

#[async_trait]
pub trait BalanceCache: Send + Sync {
    /// Returns cached metrics if they were computed from inputs with `hash`.
    async fn get(&self, family_id: &FamilyId, hash: &ContentHash) -> Result<Option<HarmonyMetrics>, BalanceCacheError>;

    /// Stores metrics computed from inputs with `hash`.
    async fn put(&self, family_id: &FamilyId, hash: ContentHash, metrics: HarmonyMetrics) -> Result<(), BalanceCacheError>;

    /// Drops whatever is cached for the family.
    async fn invalidate(&self, family_id: &FamilyId) -> Result<(), BalanceCacheError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BalanceCacheError {
    #[error("Balance cache unavailable: {0}")]
    Unavailable(String),
}

impl From<BalanceCacheError> for DomainError {
    fn from(err: BalanceCacheError) -> Self {
        DomainError::cache(err.to_string())
    }
}
