//! RatingStore port - persisted rating state keyed by family.
//!
//! The only stateful part of the engine. Writers must hold the family's
//! lock (see `application::handlers::rating::FamilyLocks`) across a
//! load-apply-save cycle; the store itself does no conflict detection.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FamilyId};
use crate::domain::rating::FamilyRatings;

#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Loads a family's ratings; `None` if no match was ever applied.
    async fn load(&self, family_id: &FamilyId) -> Result<Option<FamilyRatings>, RatingStoreError>;

    /// Saves a family's ratings, replacing any previous state.
    async fn save(&self, ratings: &FamilyRatings) -> Result<(), RatingStoreError>;

    /// Removes a family's ratings. Removing an absent family is a no-op.
    async fn delete(&self, family_id: &FamilyId) -> Result<(), RatingStoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingStoreError {
    #[error("Rating storage unavailable: {0}")]
    Unavailable(String),

    #[error("Rating serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RatingStoreError {
    fn from(err: serde_json::Error) -> Self {
        RatingStoreError::Serialization(err.to_string())
    }
}

impl From<RatingStoreError> for DomainError {
    fn from(err: RatingStoreError) -> Self {
        DomainError::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = RatingStoreError::Unavailable("connection refused".to_string());
        assert_eq!(format!("{}", err), "Rating storage unavailable: connection refused");
    }

    #[test]
    fn serde_errors_convert() {
        let parse = serde_json::from_str::<FamilyRatings>("not json").unwrap_err();
        let err: RatingStoreError = parse.into();
        assert!(matches!(err, RatingStoreError::Serialization(_)));
    }
}
