//! MatchHistory port - append-only log of applied matches.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FamilyId, MatchId};
use crate::domain::rating::MatchRecord;

/// Per-family match log, also used as the replay guard.
///
/// # Example
///
/// ```ignore
/// if history.contains(&family_id, &match_id).await? {
///     return Ok(RecordMatchOutcome::Skipped(SkipReason::Duplicate));
/// }
/// ```
#[async_trait]
pub trait MatchHistory: Send + Sync {
    /// Appends a record to the family's history.
    async fn append(&self, family_id: &FamilyId, record: MatchRecord) -> Result<(), MatchHistoryError>;

    /// True if a match with this id was already recorded for the family.
    async fn contains(&self, family_id: &FamilyId, match_id: &MatchId) -> Result<bool, MatchHistoryError>;

    /// Up to `limit` records, newest first.
    async fn recent(&self, family_id: &FamilyId, limit: usize) -> Result<Vec<MatchRecord>, MatchHistoryError>;

    /// Every record, oldest first.
    async fn all(&self, family_id: &FamilyId) -> Result<Vec<MatchRecord>, MatchHistoryError>;

    /// Drops the family's history.
    async fn clear(&self, family_id: &FamilyId) -> Result<(), MatchHistoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchHistoryError {
    #[error("Match history unavailable: {0}")]
    Unavailable(String),
}

impl From<MatchHistoryError> for DomainError {
    fn from(err: MatchHistoryError) -> Self {
        DomainError::storage(err.to_string())
    }
}
