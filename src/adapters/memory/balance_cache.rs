//! In-Memory Balance Cache
//!
//! Keeps at most one entry per family: storing metrics under a new hash
//! evicts whatever was cached for the old inputs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::balance::{ContentHash, HarmonyMetrics};
use crate::domain::foundation::FamilyId;
use crate::ports::{BalanceCache, BalanceCacheError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryBalanceCache {
    entries: Arc<RwLock<HashMap<FamilyId, (ContentHash, HarmonyMetrics)>>>,
}

impl InMemoryBalanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl BalanceCache for InMemoryBalanceCache {
    async fn get(&self, family_id: &FamilyId, hash: &ContentHash) -> Result<Option<HarmonyMetrics>, BalanceCacheError> {
        Ok(self
            .entries
            .read()
            .await
            .get(family_id)
            .filter(|(cached_hash, _)| cached_hash == hash)
            .map(|(_, metrics)| *metrics))
    }

    async fn put(&self, family_id: &FamilyId, hash: ContentHash, metrics: HarmonyMetrics) -> Result<(), BalanceCacheError> {
        self.entries.write().await.insert(family_id.clone(), (hash, metrics));
        Ok(())
    }

    async fn invalidate(&self, family_id: &FamilyId) -> Result<(), BalanceCacheError> {
        self.entries.write().await.remove(family_id);
        Ok(())
    }
}
