//! RecordMatchHandler - Command handler applying one survey answer to the ratings.

use std::sync::Arc;
use tracing::{debug, warn};

use super::{FamilyLocks, RatingCommandError};
use crate::domain::foundation::{FamilyId, MatchId};
use crate::domain::rating::{FamilyRatings, MatchOutcome, MatchRecord, RatingEngine};
use crate::domain::survey::{normalize_answer, Category, QuestionClassifier, SurveyResponse, TaskWeight};
use crate::ports::{MatchHistory, RatingStore, SurveyResponseReader};

/// Command to record one answer as a match.
///
/// The match id is derived from `response.identity()`, so sending the same
/// response again is a no-op, before or after a rebuild.
#[derive(Debug, Clone)]
pub struct RecordMatchCommand {
    pub family_id: FamilyId,
    pub response: SurveyResponse,
    /// Explicit weight, clamped into [1, 10]; when `None` the family's
    /// weight lookup is used.
    pub weight: Option<f64>,
}

impl RecordMatchCommand {
    pub fn new(family_id: FamilyId, response: SurveyResponse) -> Self {
        Self {
            family_id,
            response,
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn match_id(&self) -> MatchId {
        MatchId::for_response(&self.family_id, self.response.identity())
    }
}

/// Why a command did not produce a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty, not-applicable or unrecognised answer.
    UnknownAnswer,
    /// The question falls outside every category range.
    Unclassified,
    /// A response with this id was already recorded.
    Duplicate,
}

/// Result of a record-match command.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordMatchOutcome {
    Applied(MatchRecord),
    /// "Nobody does this" was counted against the task; no rating moved.
    Uncovered { question_id: String, category: Category },
    Skipped(SkipReason),
}

impl RecordMatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RecordMatchOutcome::Applied(_))
    }
}

/// Handler for recording matches.
///
/// Holds the family lock across load, apply, save and append, so
/// concurrent commands for one family are applied one after another.
pub struct RecordMatchHandler {
    survey: Arc<dyn SurveyResponseReader>,
    ratings: Arc<dyn RatingStore>,
    history: Arc<dyn MatchHistory>,
    locks: Arc<FamilyLocks>,
    classifier: QuestionClassifier,
    engine: RatingEngine,
}

impl RecordMatchHandler {
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

    pub async fn handle(&self, cmd: RecordMatchCommand) -> Result<RecordMatchOutcome, RatingCommandError> {
        // 1. Filter out answers that cannot be recorded
        let answer = normalize_answer(&cmd.response.answer);
        if !answer.is_known() {
            debug!(family_id = %cmd.family_id, question_id = %cmd.response.question_id, "Skipping unknown answer");
            return Ok(RecordMatchOutcome::Skipped(SkipReason::UnknownAnswer));
        }
        let Some(category) = self.classifier.classify_response(&cmd.response) else {
            debug!(family_id = %cmd.family_id, question_id = %cmd.response.question_id, "Skipping unclassified question");
            return Ok(RecordMatchOutcome::Skipped(SkipReason::Unclassified));
        };
        let Some(outcome) = MatchOutcome::from_answer(answer) else {
            return self.record_uncovered(&cmd, category).await;
        };

        // 2. Resolve weight
        let weight = match cmd.weight {
            Some(weight) => TaskWeight::new(weight).value(),
            None => self
                .survey
                .question_weights(&cmd.family_id)
                .await?
                .weight_for(&cmd.response.question_id)
                .value(),
        };

        // 3. Serialize with other writers for this family
        let match_id = cmd.match_id();
        let _guard = self.locks.acquire(&cmd.family_id).await;

        if self.history.contains(&cmd.family_id, &match_id).await? {
            debug!(family_id = %cmd.family_id, match_id = %match_id, "Skipping replayed match");
            return Ok(RecordMatchOutcome::Skipped(SkipReason::Duplicate));
        }

        // 4. Load, apply, persist
        let previous = self.ratings.load(&cmd.family_id).await?;
        if previous.as_ref().is_some_and(|r| r.has_uncovered(&match_id)) {
            debug!(family_id = %cmd.family_id, match_id = %match_id, "Skipping response already counted as uncovered");
            return Ok(RecordMatchOutcome::Skipped(SkipReason::Duplicate));
        }
        let mut ratings = previous
            .clone()
            .unwrap_or_else(|| FamilyRatings::new(cmd.family_id.clone()));

        let record = self.engine.apply_match(
            &mut ratings,
            match_id,
            &cmd.response.question_id,
            category,
            outcome,
            Some(weight),
        );

        self.ratings.save(&ratings).await?;
        if let Err(err) = self.history.append(&cmd.family_id, record.clone()).await {
            // History is the replay guard; ratings must not move without it.
            self.restore(&cmd.family_id, previous).await;
            return Err(err.into());
        }

        Ok(RecordMatchOutcome::Applied(record))
    }

    async fn record_uncovered(
        &self,
        cmd: &RecordMatchCommand,
        category: Category,
    ) -> Result<RecordMatchOutcome, RatingCommandError> {
        let match_id = cmd.match_id();
        let _guard = self.locks.acquire(&cmd.family_id).await;

        if self.history.contains(&cmd.family_id, &match_id).await? {
            debug!(family_id = %cmd.family_id, match_id = %match_id, "Skipping response already applied as a match");
            return Ok(RecordMatchOutcome::Skipped(SkipReason::Duplicate));
        }

        let mut ratings = self
            .ratings
            .load(&cmd.family_id)
            .await?
            .unwrap_or_else(|| FamilyRatings::new(cmd.family_id.clone()));
        let question_id = cmd.response.question_id.clone();
        if !self.engine.record_uncovered(&mut ratings, match_id, &question_id, category) {
            debug!(family_id = %cmd.family_id, match_id = %match_id, "Skipping replayed uncovered answer");
            return Ok(RecordMatchOutcome::Skipped(SkipReason::Duplicate));
        }
        self.ratings.save(&ratings).await?;

        Ok(RecordMatchOutcome::Uncovered { question_id, category })
    }

    async fn restore(&self, family_id: &FamilyId, previous: Option<FamilyRatings>) {
        let restored = match &previous {
            Some(ratings) => self.ratings.save(ratings).await,
            None => self.ratings.delete(family_id).await,
        };
        if let Err(e) = restored {
            warn!(family_id = %family_id, error = %e, "Failed to restore ratings after history append failure");
        }
    }
}
