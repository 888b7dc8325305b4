//! In-Memory Rating Store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::FamilyId;
use crate::domain::rating::FamilyRatings;
use crate::ports::{RatingStore, RatingStoreError};

/// Rating state held in memory. Does not persist across restarts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRatingStore {
    ratings: Arc<RwLock<HashMap<FamilyId, FamilyRatings>>>,
}

impl InMemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of families with stored ratings.
    pub async fn family_count(&self) -> usize {
        self.ratings.read().await.len()
    }
}

#[async_trait]
impl RatingStore for InMemoryRatingStore {
    async fn load(&self, family_id: &FamilyId) -> Result<Option<FamilyRatings>, RatingStoreError> {
        Ok(self.ratings.read().await.get(family_id).cloned())
    }

    async fn save(&self, ratings: &FamilyRatings) -> Result<(), RatingStoreError> {
        self.ratings
            .write()
            .await
            .insert(ratings.family_id().clone(), ratings.clone());
        Ok(())
    }

    async fn delete(&self, family_id: &FamilyId) -> Result<(), RatingStoreError> {
        self.ratings.write().await.remove(family_id);
        Ok(())
    }
}
