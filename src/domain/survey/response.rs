//! Survey response records as delivered by the survey collection system.

use serde::{Deserialize, Serialize};

/// One recorded answer to one survey question.
///
/// Immutable once recorded. The engine only borrows these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    /// Question key, e.g. `"q42"` or `"user7_q42"`.
    pub question_id: String,
    /// Free-text answer, e.g. `"Mama"`, `"Dad"`, `"Both equally"`, `"N/A"`.
    pub answer: String,
    /// Category label stored alongside some responses; overrides the id range when recognised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Stable id assigned by the collection system, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl SurveyResponse {
    /// Creates a response without a stored category label.
    pub fn new(question_id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
            category: None,
            response_id: None,
        }
    }

    /// Attaches the collection system's response id.
    pub fn with_response_id(mut self, id: impl Into<String>) -> Self {
        self.response_id = Some(id.into());
        self
    }

    /// Key identifying this response within its family: the response id
    /// when present, otherwise the question key.
    pub fn identity(&self) -> &str {
        self.response_id.as_deref().unwrap_or(&self.question_id)
    }

    /// Attaches a stored category label.
    pub fn with_category(mut self, label: impl Into<String>) -> Self {
        self.category = Some(label.into());
        self
    }
}
