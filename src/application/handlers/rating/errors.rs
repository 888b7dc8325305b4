//! Errors raised by rating command handlers.

use crate::domain::foundation::DomainError;
use crate::ports::{MatchHistoryError, RatingStoreError, SurveyReaderError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingCommandError {
    #[error(transparent)]
    SurveyReader(#[from] SurveyReaderError),

    #[error(transparent)]
    RatingStore(#[from] RatingStoreError),

    #[error(transparent)]
    MatchHistory(#[from] MatchHistoryError),
}

impl From<RatingCommandError> for DomainError {
    fn from(err: RatingCommandError) -> Self {
        DomainError::storage(err.to_string())
    }
}
