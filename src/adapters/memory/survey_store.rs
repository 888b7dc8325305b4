//! In-Memory Survey Store
//!
//! Holds survey responses and question weights per family.
//! Useful for testing and for embedding the engine without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::FamilyId;
use crate::domain::survey::{QuestionWeights, SurveyResponse, TaskWeight};
use crate::ports::{SurveyReaderError, SurveyResponseReader};

/// In-memory survey data, keyed by family.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyStore {
    responses: Arc<RwLock<HashMap<FamilyId, Vec<SurveyResponse>>>>,
    weights: Arc<RwLock<HashMap<FamilyId, QuestionWeights>>>,
    default_weight: TaskWeight,
}

impl InMemorySurveyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose weight lookups fall back to `default_weight`.
    pub fn with_default_weight(default_weight: TaskWeight) -> Self {
        Self {
            default_weight,
            ..Self::default()
        }
    }

    fn empty_weights(&self) -> QuestionWeights {
        QuestionWeights::new().with_default(self.default_weight)
    }

    /// Appends a response to the family's list.
    pub async fn record(&self, family_id: &FamilyId, response: SurveyResponse) {
        self.responses
            .write()
            .await
            .entry(family_id.clone())
            .or_default()
            .push(response);
    }

    /// Replaces the family's responses.
    pub async fn replace_responses(&self, family_id: &FamilyId, responses: Vec<SurveyResponse>) {
        self.responses.write().await.insert(family_id.clone(), responses);
    }

    /// Replaces the answer of the first response to `question_id`.
    /// Returns false if the family has no such response.
    pub async fn edit_answer(&self, family_id: &FamilyId, question_id: &str, answer: &str) -> bool {
        let mut responses = self.responses.write().await;
        match responses
            .get_mut(family_id)
            .and_then(|list| list.iter_mut().find(|r| r.question_id == question_id))
        {
            Some(response) => {
                response.answer = answer.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes every response to `question_id`. Returns how many were removed.
    pub async fn remove(&self, family_id: &FamilyId, question_id: &str) -> usize {
        let mut responses = self.responses.write().await;
        let Some(list) = responses.get_mut(family_id) else {
            return 0;
        };
        let before = list.len();
        list.retain(|r| r.question_id != question_id);
        before - list.len()
    }

    /// Sets one question's weight.
    pub async fn set_weight(&self, family_id: &FamilyId, question_id: &str, weight: TaskWeight) {
        self.weights
            .write()
            .await
            .entry(family_id.clone())
            .or_insert_with(|| self.empty_weights())
            .insert(question_id, weight);
    }
}

#[async_trait]
impl SurveyResponseReader for InMemorySurveyStore {
    async fn responses(&self, family_id: &FamilyId) -> Result<Vec<SurveyResponse>, SurveyReaderError> {
        Ok(self
            .responses
            .read()
            .await
            .get(family_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn question_weights(&self, family_id: &FamilyId) -> Result<QuestionWeights, SurveyReaderError> {
        Ok(self
            .weights
            .read()
            .await
            .get(family_id)
            .cloned()
            .unwrap_or_else(|| self.empty_weights()))
    }
}
