//! Per-family write serialization.
//!
//! Rating updates are read-modify-write on a family's `FamilyRatings`, so
//! two writers for the same family must not interleave. Different families
//! never contend.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::FamilyId;

/// Registry of one async mutex per family.
///
/// Share a single instance (behind `Arc`) between every handler that writes
/// ratings.
#[derive(Debug, Default)]
pub struct FamilyLocks {
    locks: Mutex<HashMap<FamilyId, Arc<Mutex<()>>>>,
}

impl FamilyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the family's rating state.
    ///
    /// The guard releases the family when dropped.
    pub async fn acquire(&self, family_id: &FamilyId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(family_id.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of families that have been locked at least once.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locks.lock().await.is_empty()
    }
}
