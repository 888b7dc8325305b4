//! Question Classifier - maps question keys onto categories.

use super::{Category, ClassificationTable, SurveyResponse};

/// Classifies question keys against a fixed ordinal table.
///
/// Classification is a pure function of the key and the table. Keys with no
/// extractable ordinal, or with an ordinal outside every range, are
/// unclassified (`None`). That is not an error: surveys grow past the
/// configured ranges and such answers are simply left out of aggregation.
#[derive(Debug, Clone, Default)]
pub struct QuestionClassifier {
    table: ClassificationTable,
}

impl QuestionClassifier {
    pub fn new(table: ClassificationTable) -> Self {
        Self { table }
    }

    /// Returns the underlying table.
    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    /// Classifies a question key by its ordinal.
    pub fn classify(&self, question_id: &str) -> Option<Category> {
        extract_ordinal(question_id).and_then(|n| self.table.lookup(n))
    }

    /// Classifies a response, preferring a recognised stored category label.
    pub fn classify_response(&self, response: &SurveyResponse) -> Option<Category> {
        response
            .category
            .as_deref()
            .and_then(Category::from_label)
            .or_else(|| self.classify(&response.question_id))
    }
}

/// Extracts the question ordinal from a key.
///
/// Only the segment after the last `_` is considered (keys may carry a
/// respondent prefix such as `"user42_q17"`); every non-digit in that segment
/// is dropped.
pub fn extract_ordinal(question_id: &str) -> Option<u32> {
    let segment = question_id.rsplit('_').next().unwrap_or(question_id);
    let digits: String = segment.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
