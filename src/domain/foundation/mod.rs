//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the family balance domain.

mod errors;
mod ids;
mod parent;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{FamilyId, MatchId};
pub use parent::Parent;
pub use percentage::Percentage;
pub use timestamp::Timestamp;
