//! Content hash of a family's survey inputs, used as a cache key.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::domain::survey::{QuestionWeights, SurveyResponse};

/// SHA-256 over the response set and the weight lookup.
///
/// Any edit, insertion or deletion of a response or weight changes the hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of(responses: &[SurveyResponse], weights: &QuestionWeights) -> Self {
        let mut hasher = Sha256::new();

        for response in responses {
            hasher.update(b"r");
            hash_field(&mut hasher, &response.question_id);
            hash_field(&mut hasher, &response.answer);
            hash_field(&mut hasher, response.category.as_deref().unwrap_or(""));
        }

        hasher.update(b"d");
        hasher.update(weights.default_weight().value().to_bits().to_be_bytes());
        for (question_id, weight) in weights.iter() {
            hasher.update(b"w");
            hash_field(&mut hasher, question_id);
            hasher.update(weight.value().to_bits().to_be_bytes());
        }

        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Length-prefixed so that field boundaries cannot shift between inputs.
fn hash_field(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
