//! In-Memory Match History

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{FamilyId, MatchId};
use crate::domain::rating::MatchRecord;
use crate::ports::{MatchHistory, MatchHistoryError};

/// Match records per family, oldest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMatchHistory {
    records: Arc<RwLock<HashMap<FamilyId, Vec<MatchRecord>>>>,
}

impl InMemoryMatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records for a family.
    pub async fn len(&self, family_id: &FamilyId) -> usize {
        self.records
            .read()
            .await
            .get(family_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl MatchHistory for InMemoryMatchHistory {
    async fn append(&self, family_id: &FamilyId, record: MatchRecord) -> Result<(), MatchHistoryError> {
        self.records
            .write()
            .await
            .entry(family_id.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn contains(&self, family_id: &FamilyId, match_id: &MatchId) -> Result<bool, MatchHistoryError> {
        Ok(self
            .records
            .read()
            .await
            .get(family_id)
            .is_some_and(|list| list.iter().any(|r| &r.match_id == match_id)))
    }

    async fn recent(&self, family_id: &FamilyId, limit: usize) -> Result<Vec<MatchRecord>, MatchHistoryError> {
        Ok(self
            .records
            .read()
            .await
            .get(family_id)
            .map(|list| list.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn all(&self, family_id: &FamilyId) -> Result<Vec<MatchRecord>, MatchHistoryError> {
        Ok(self
            .records
            .read()
            .await
            .get(family_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn clear(&self, family_id: &FamilyId) -> Result<(), MatchHistoryError> {
        self.records.write().await.remove(family_id);
        Ok(())
    }
}
