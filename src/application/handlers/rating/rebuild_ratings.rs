//! RebuildRatingsHandler - recomputes a family's ratings from its stored answers.
//!
//! Incremental recording cannot see answers that were edited or deleted
//! afterwards. A rebuild discards the rating state and history and replays
//! every stored response in recording order. Match ids are derived from
//! response identity exactly as when recording, so earlier commands stay
//! recognised as replays afterwards.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::{FamilyLocks, RatingCommandError};
use crate::domain::foundation::{FamilyId, MatchId};
use crate::domain::rating::{FamilyRatings, MatchOutcome, RatingEngine};
use crate::domain::survey::{normalize_answer, QuestionClassifier};
use crate::ports::{MatchHistory, RatingStore, SurveyResponseReader};

#[derive(Debug, Clone)]
pub struct RebuildRatingsCommand {
    pub family_id: FamilyId,
}

#[derive(Debug, Clone)]
pub struct RebuildRatingsResult {
    pub ratings: FamilyRatings,
    /// Responses replayed as matches.
    pub applied: u32,
    /// "Nobody" answers counted against their task.
    pub uncovered: u32,
    /// Responses with unknown answers, unclassified questions, or an
    /// identity already replayed.
    pub skipped: u32,
}

pub struct RebuildRatingsHandler {
    survey: Arc<dyn SurveyResponseReader>,
    ratings: Arc<dyn RatingStore>,
    history: Arc<dyn MatchHistory>,
    locks: Arc<FamilyLocks>,
    classifier: QuestionClassifier,
    engine: RatingEngine,
}

impl RebuildRatingsHandler {
    pub fn new(
        survey: Arc<dyn SurveyResponseReader>,
        ratings: Arc<dyn RatingStore>,
        history: Arc<dyn MatchHistory>,
        locks: Arc<FamilyLocks>,
        classifier: QuestionClassifier,
        engine: RatingEngine,
    ) -> Self {
        Self {
            survey,
            ratings,
            history,
            locks,
            classifier,
            engine,
        }
    }

    pub async fn handle(&self, cmd: RebuildRatingsCommand) -> Result<RebuildRatingsResult, RatingCommandError> {
        let family_id = cmd.family_id;
        let _guard = self.locks.acquire(&family_id).await;

        let (responses, weights) = futures::try_join!(
            self.survey.responses(&family_id),
            self.survey.question_weights(&family_id),
        )?;

        let mut ratings = FamilyRatings::new(family_id.clone());
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut skipped = 0u32;
        let mut uncovered = 0u32;

        for response in &responses {
            let answer = normalize_answer(&response.answer);
            let known = answer.is_known();
            let Some(category) = self.classifier.classify_response(response).filter(|_| known) else {
                skipped += 1;
                continue;
            };
            let match_id = MatchId::for_response(&family_id, response.identity());
            if !seen.insert(match_id) {
                skipped += 1;
                continue;
            }
            let Some(outcome) = MatchOutcome::from_answer(answer) else {
                self.engine
                    .record_uncovered(&mut ratings, match_id, &response.question_id, category);
                uncovered += 1;
                continue;
            };
            records.push(self.engine.apply_match(
                &mut ratings,
                match_id,
                &response.question_id,
                category,
                outcome,
                Some(weights.weight_for(&response.question_id).value()),
            ));
        }

        self.history.clear(&family_id).await?;
        if ratings.is_empty() {
            self.ratings.delete(&family_id).await?;
        } else {
            self.ratings.save(&ratings).await?;
        }
        let applied = u32::try_from(records.len()).unwrap_or(u32::MAX);
        for record in records {
            self.history.append(&family_id, record).await?;
        }

        info!(family_id = %family_id, applied, uncovered, skipped, "Ratings rebuilt");

        Ok(RebuildRatingsResult {
            ratings,
            applied,
            uncovered,
            skipped,
        })
    }
}
