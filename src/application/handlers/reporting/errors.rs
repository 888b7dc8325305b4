//! Errors raised by reporting query handlers.
//!
//! Missing data is never an error here; only storage failures are.

use crate::domain::foundation::{DomainError, FamilyId};
use crate::domain::rating::FamilyRatings;
use crate::ports::{MatchHistoryError, RatingStore, RatingStoreError, SurveyReaderError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportingError {
    #[error(transparent)]
    SurveyReader(#[from] SurveyReaderError),

    #[error(transparent)]
    RatingStore(#[from] RatingStoreError),

    #[error(transparent)]
    MatchHistory(#[from] MatchHistoryError),
}

impl From<ReportingError> for DomainError {
    fn from(err: ReportingError) -> Self {
        DomainError::storage(err.to_string())
    }
}

/// Loads a family's ratings, or a fresh state if it has none.
pub(super) async fn load_or_fresh(
    store: &dyn RatingStore,
    family_id: &FamilyId,
) -> Result<FamilyRatings, ReportingError> {
    Ok(store
        .load(family_id)
        .await?
        .unwrap_or_else(|| FamilyRatings::new(family_id.clone())))
}
