//! SurveyResponseReader port - read access to a family's survey answers.
//!
//! Responses and weights are owned by the survey collection system; the
//! engine only reads them. A family with no answers yet is not an error:
//! readers return an empty list and an empty weight lookup.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FamilyId};
use crate::domain::survey::{QuestionWeights, SurveyResponse};

/// Read-only port for survey responses and question weights.
#[async_trait]
pub trait SurveyResponseReader: Send + Sync {
    /// All recorded responses of a family, in recording order.
    async fn responses(&self, family_id: &FamilyId) -> Result<Vec<SurveyResponse>, SurveyReaderError>;

    /// The family's `questionId -> weight` lookup.
    async fn question_weights(&self, family_id: &FamilyId) -> Result<QuestionWeights, SurveyReaderError>;
}

/// Errors raised while reading survey data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyReaderError {
    #[error("Survey storage unavailable: {0}")]
    Unavailable(String),

    #[error("Survey data corrupted for family {family_id}: {reason}")]
    Corrupted { family_id: FamilyId, reason: String },
}

impl From<SurveyReaderError> for DomainError {
    fn from(err: SurveyReaderError) -> Self {
        DomainError::storage(err.to_string())
    }
}
