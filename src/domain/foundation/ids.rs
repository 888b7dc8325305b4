//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier of a family, as issued by the surrounding account system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(String);

impl FamilyId {
    /// Creates a new FamilyId, returning error if empty or blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("family_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Namespace for match ids derived from response identity.
const RESPONSE_NAMESPACE: Uuid = Uuid::from_u128(0x6a1f_3c2e_9b4d_4e57_8f10_2d6c_b3a9_e471);

/// Unique identifier for one applied match (one survey answer fed to the ratings).
///
/// Recorded matches use `for_response`, so the same response always maps to
/// the same id and replays can be detected, including after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Creates a new random MatchId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id for a family's response, given its identity key
    /// (see `SurveyResponse::identity`).
    pub fn for_response(family_id: &FamilyId, response_key: &str) -> Self {
        let mut name = Vec::with_capacity(family_id.as_str().len() + response_key.len() + 1);
        name.extend_from_slice(family_id.as_str().as_bytes());
        name.push(0x1f);
        name.extend_from_slice(response_key.as_bytes());
        Self(Uuid::new_v5(&RESPONSE_NAMESPACE, &name))
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
