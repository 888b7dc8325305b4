//! Rating Engine - applies matches to a family's rating state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::{
    EloCalculator, MatchOutcome, MatchRecord, RatingChange, RatingPair, RatingScope,
    RatingSettings, NEUTRAL_MATCH_WEIGHT,
};
use crate::domain::foundation::{FamilyId, MatchId, Timestamp};
use crate::domain::survey::Category;

/// Rating pair and answer counts for one task (one question).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRatings {
    /// Category of the most recent answer to this task.
    pub category: Category,
    pub pair: RatingPair,
    /// Matches answered as shared.
    pub both_count: u32,
    /// Answers naming nobody. These are not matches.
    pub neither_count: u32,
}

impl TaskRatings {
    fn initial(task: &str, category: Category, initial_rating: f64) -> Self {
        Self {
            category,
            pair: RatingPair::initial(RatingScope::Task(task.to_string()), initial_rating),
            both_count: 0,
            neither_count: 0,
        }
    }

    pub fn match_count(&self) -> u32 {
        self.pair.match_count()
    }

    /// More "nobody" answers than matches.
    pub fn is_uncovered(&self) -> bool {
        self.neither_count > self.match_count()
    }
}

/// All rating pairs of one family.
///
/// A scope without a pair is uninitialized; its first match creates both
/// sides at the initial rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRatings {
    family_id: FamilyId,
    #[serde(default)]
    tasks: BTreeMap<String, TaskRatings>,
    categories: BTreeMap<Category, RatingPair>,
    global: Option<RatingPair>,
    /// Ids of "nobody" answers already counted.
    #[serde(default)]
    uncovered_ids: BTreeSet<MatchId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl FamilyRatings {
    /// A family with no matches yet.
    pub fn new(family_id: FamilyId) -> Self {
        let now = Timestamp::now();
        Self {
            family_id,
            tasks: BTreeMap::new(),
            categories: BTreeMap::new(),
            global: None,
            uncovered_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn family_id(&self) -> &FamilyId {
        &self.family_id
    }

    pub fn task(&self, task: &str) -> Option<&TaskRatings> {
        self.tasks.get(task)
    }

    /// Tasks with at least one match or "nobody" answer, in key order.
    pub fn tasks(&self) -> impl Iterator<Item = (&str, &TaskRatings)> {
        self.tasks.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn category(&self, category: Category) -> Option<&RatingPair> {
        self.categories.get(&category)
    }

    pub fn global(&self) -> Option<&RatingPair> {
        self.global.as_ref()
    }

    /// Initialized category pairs in category order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &RatingPair)> {
        self.categories.iter().map(|(c, p)| (*c, p))
    }

    /// The task entry, or a fresh one if the task has not been answered.
    pub fn task_or_initial(&self, task: &str, category: Category, initial_rating: f64) -> TaskRatings {
        self.tasks
            .get(task)
            .cloned()
            .unwrap_or_else(|| TaskRatings::initial(task, category, initial_rating))
    }

    /// The category pair, or a fresh one if the category has no matches.
    pub fn category_or_initial(&self, category: Category, initial_rating: f64) -> RatingPair {
        self.categories
            .get(&category)
            .cloned()
            .unwrap_or_else(|| RatingPair::initial(RatingScope::Category(category), initial_rating))
    }

    /// The global pair, or a fresh one if the family has no matches.
    pub fn global_or_initial(&self, initial_rating: f64) -> RatingPair {
        self.global
            .clone()
            .unwrap_or_else(|| RatingPair::initial(RatingScope::Global, initial_rating))
    }

    /// Matches applied so far (the global match count).
    pub fn total_matches(&self) -> u32 {
        self.global.as_ref().map(|g| g.match_count()).unwrap_or(0)
    }

    /// Whether a "nobody" answer with this id was already counted.
    pub fn has_uncovered(&self, match_id: &MatchId) -> bool {
        self.uncovered_ids.contains(match_id)
    }

    /// No matches and no "nobody" answers.
    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.tasks.is_empty()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

/// Applies matches with a fixed set of rating constants.
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    settings: RatingSettings,
}

impl RatingEngine {
    pub fn new(settings: RatingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RatingSettings {
        &self.settings
    }

    /// Applies one match to the task, category and global scopes.
    ///
    /// Every call counts as a new match; the engine does not deduplicate.
    /// A missing or non-finite weight is replaced by the neutral weight.
    pub fn apply_match(
        &self,
        ratings: &mut FamilyRatings,
        match_id: MatchId,
        question_id: &str,
        category: Category,
        outcome: MatchOutcome,
        weight: Option<f64>,
    ) -> MatchRecord {
        let weight = weight.filter(|w| w.is_finite()).unwrap_or(NEUTRAL_MATCH_WEIGHT);
        let multiplier = EloCalculator::weight_multiplier(Some(weight));
        let initial = self.settings.initial_rating;

        let task_before = ratings.task_or_initial(question_id, category, initial);
        let task_after = self.advanced(&task_before.pair, outcome, multiplier);

        let category_before = ratings.category_or_initial(category, initial);
        let category_update = EloCalculator::update(
            category_before.mama.value,
            category_before.papa.value,
            outcome,
            self.settings.k_factor,
            multiplier,
        );
        let mut category_after = category_before.clone();
        category_after.advance(category_update.mama_delta, category_update.papa_delta);

        let global_before = ratings.global_or_initial(initial);
        let global_after = self.advanced(&global_before, outcome, multiplier);

        let task_change = RatingChange::between(&task_before.pair, &task_after);
        let category_change = RatingChange::between(&category_before, &category_after);
        let global_change = RatingChange::between(&global_before, &global_after);

        debug!(
            family_id = %ratings.family_id,
            question_id,
            category = category.key(),
            ?outcome,
            weight,
            multiplier,
            mama = category_after.mama.value,
            papa = category_after.papa.value,
            "Match applied"
        );

        ratings.tasks.insert(
            question_id.to_string(),
            TaskRatings {
                category,
                pair: task_after,
                both_count: task_before.both_count + u32::from(outcome == MatchOutcome::Tie),
                neither_count: task_before.neither_count,
            },
        );
        ratings.categories.insert(category, category_after);
        ratings.global = Some(global_after);
        ratings.updated_at = Timestamp::now();

        MatchRecord {
            match_id,
            question_id: question_id.to_string(),
            category,
            outcome,
            weight,
            multiplier,
            expected_mama: category_update.expected_mama,
            expected_papa: category_update.expected_papa,
            task_change,
            category_change,
            global_change,
            recorded_at: ratings.updated_at,
        }
    }

    /// Counts a "nobody does this" answer against a task.
    ///
    /// No rating moves. Returns `false` when `match_id` was already counted.
    pub fn record_uncovered(
        &self,
        ratings: &mut FamilyRatings,
        match_id: MatchId,
        question_id: &str,
        category: Category,
    ) -> bool {
        if !ratings.uncovered_ids.insert(match_id) {
            return false;
        }

        let initial = self.settings.initial_rating;
        let task = ratings
            .tasks
            .entry(question_id.to_string())
            .or_insert_with(|| TaskRatings::initial(question_id, category, initial));
        task.category = category;
        task.neither_count = task.neither_count.saturating_add(1);
        let neither_count = task.neither_count;
        ratings.updated_at = Timestamp::now();

        debug!(
            family_id = %ratings.family_id,
            question_id,
            category = category.key(),
            neither_count,
            "Uncovered answer recorded"
        );
        true
    }

    fn advanced(&self, before: &RatingPair, outcome: MatchOutcome, multiplier: f64) -> RatingPair {
        let update = EloCalculator::update(
            before.mama.value,
            before.papa.value,
            outcome,
            self.settings.k_factor,
            multiplier,
        );
        let mut after = before.clone();
        after.advance(update.mama_delta, update.papa_delta);
        after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Parent;

    fn family() -> FamilyRatings {
        FamilyRatings::new(FamilyId::new("family-1").unwrap())
    }

    fn apply(
        engine: &RatingEngine,
        ratings: &mut FamilyRatings,
        category: Category,
        outcome: MatchOutcome,
        weight: Option<f64>,
    ) -> MatchRecord {
        engine.apply_match(ratings, MatchId::new(), "q1", category, outcome, weight)
    }

    #[test]
    fn fresh_family_has_no_pairs() {
        let ratings = family();
        assert!(ratings.is_empty());
        assert_eq!(ratings.total_matches(), 0);
        assert!(ratings.category(Category::VisibleHousehold).is_none());
        let fresh = ratings.global_or_initial(1500.0);
        assert_eq!(fresh.mama.value, 1500.0);
        assert_eq!(fresh.match_count(), 0);
    }

    #[test]
    fn first_heavy_mama_win_moves_both_scopes_by_14_4() {
        let engine = RatingEngine::default();
        let mut ratings = family();

        let record = apply(
            &engine,
            &mut ratings,
            Category::InvisibleParenting,
            MatchOutcome::MamaWins,
            Some(9.0),
        );

        for pair in [
            ratings.category(Category::InvisibleParenting).unwrap(),
            ratings.global().unwrap(),
        ] {
            assert!((pair.mama.value - 1514.4).abs() < 1e-9);
            assert!((pair.papa.value - 1485.6).abs() < 1e-9);
            assert_eq!(pair.mama.display_value(), 1514);
            assert_eq!(pair.papa.display_value(), 1486);
            assert_eq!(pair.mama.match_count, 1);
            assert_eq!(pair.papa.match_count, 1);
        }

        assert!((record.multiplier - 1.8).abs() < 1e-12);
        assert_eq!(record.expected_mama, 0.5);
        assert_eq!(record.category_change.mama_before, 1500.0);
        assert_eq!(record.global_change.scope, RatingScope::Global);
        assert_eq!(record.winner(), Some(Parent::Mama));
        assert!((record.impact() - 14.4).abs() < 1e-9);
    }

    #[test]
    fn untouched_categories_stay_uninitialized() {
        let engine = RatingEngine::default();
        let mut ratings = family();
        apply(&engine, &mut ratings, Category::VisibleHousehold, MatchOutcome::Tie, None);

        assert!(ratings.category(Category::VisibleHousehold).is_some());
        assert!(ratings.category(Category::InvisibleHousehold).is_none());
        assert_eq!(ratings.categories().count(), 1);
    }

    #[test]
    fn global_accumulates_across_categories() {
        let engine = RatingEngine::default();
        let mut ratings = family();
        apply(&engine, &mut ratings, Category::VisibleHousehold, MatchOutcome::PapaWins, Some(5.0));
        apply(&engine, &mut ratings, Category::InvisibleHousehold, MatchOutcome::PapaWins, Some(5.0));

        assert_eq!(ratings.total_matches(), 2);
        assert_eq!(ratings.category(Category::VisibleHousehold).unwrap().match_count(), 1);
        let global = ratings.global().unwrap();
        assert!(global.papa.value > 1500.0 + 8.0);
        assert!((global.mama.value + global.papa.value - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn nan_weight_counts_as_neutral() {
        let engine = RatingEngine::default();
        let mut ratings = family();
        let record = apply(
            &engine,
            &mut ratings,
            Category::VisibleParenting,
            MatchOutcome::MamaWins,
            Some(f64::NAN),
        );
        assert_eq!(record.weight, 5.0);
        assert_eq!(record.multiplier, 1.0);
        assert_eq!(ratings.global().unwrap().mama.value, 1508.0);
    }

    #[test]
    fn custom_k_factor_is_used() {
        let engine = RatingEngine::new(RatingSettings {
            k_factor: 32.0,
            ..RatingSettings::default()
        });
        let mut ratings = family();
        apply(&engine, &mut ratings, Category::VisibleHousehold, MatchOutcome::MamaWins, None);
        assert_eq!(ratings.global().unwrap().mama.value, 1516.0);
    }

    #[test]
    fn match_updates_its_task_scope() {
        let engine = RatingEngine::default();
        let mut ratings = family();
        let record = engine.apply_match(
            &mut ratings,
            MatchId::new(),
            "q61",
            Category::InvisibleParenting,
            MatchOutcome::MamaWins,
            Some(9.0),
        );

        let task = ratings.task("q61").unwrap();
        assert_eq!(task.category, Category::InvisibleParenting);
        assert_eq!(task.match_count(), 1);
        assert!((task.pair.mama.value - 1514.4).abs() < 1e-9);
        assert_eq!(task.pair.mama.scope, RatingScope::Task("q61".to_string()));
        assert_eq!(record.task_change.scope, RatingScope::Task("q61".to_string()));
        assert!(ratings.task("q62").is_none());
    }

    #[test]
    fn tasks_keep_separate_pairs_within_a_category() {
        let engine = RatingEngine::default();
        let mut ratings = family();
        let category = Category::VisibleHousehold;
        for _ in 0..3 {
            engine.apply_match(&mut ratings, MatchId::new(), "q1", category, MatchOutcome::MamaWins, None);
        }
        engine.apply_match(&mut ratings, MatchId::new(), "q2", category, MatchOutcome::PapaWins, None);
        engine.apply_match(&mut ratings, MatchId::new(), "q2", category, MatchOutcome::Tie, None);

        let q1 = ratings.task("q1").unwrap();
        let q2 = ratings.task("q2").unwrap();
        assert_eq!(q1.match_count(), 3);
        assert_eq!(q2.match_count(), 2);
        assert_eq!(q1.both_count, 0);
        assert_eq!(q2.both_count, 1);
        assert!(q1.pair.mama.value > q1.pair.papa.value);
        assert!(q2.pair.papa.value > q2.pair.mama.value);
        assert_eq!(ratings.category(category).unwrap().match_count(), 5);
        assert_eq!(ratings.tasks().map(|(key, _)| key).collect::<Vec<_>>(), ["q1", "q2"]);
    }

    #[test]
    fn uncovered_answer_counts_once_and_moves_no_rating() {
        let engine = RatingEngine::default();
        let mut ratings = family();
        let id = MatchId::new();

        assert!(engine.record_uncovered(&mut ratings, id, "q30", Category::InvisibleHousehold));
        assert!(!engine.record_uncovered(&mut ratings, id, "q30", Category::InvisibleHousehold));

        let task = ratings.task("q30").unwrap();
        assert_eq!(task.neither_count, 1);
        assert_eq!(task.match_count(), 0);
        assert_eq!(task.pair.mama.value, 1500.0);
        assert!(task.is_uncovered());
        assert!(ratings.has_uncovered(&id));
        assert!(ratings.global().is_none());
        assert!(!ratings.is_empty());
    }

    #[test]
    fn task_is_uncovered_only_while_nobody_answers_outnumber_matches() {
        let engine = RatingEngine::default();
        let mut ratings = family();
        let category = Category::InvisibleHousehold;
        engine.record_uncovered(&mut ratings, MatchId::new(), "q30", category);
        engine.apply_match(&mut ratings, MatchId::new(), "q30", category, MatchOutcome::PapaWins, None);
        assert!(!ratings.task("q30").unwrap().is_uncovered());

        engine.record_uncovered(&mut ratings, MatchId::new(), "q30", category);
        let task = ratings.task("q30").unwrap();
        assert_eq!(task.neither_count, 2);
        assert!(task.is_uncovered());
    }

    #[test]
    fn ratings_without_task_fields_still_load() {
        let ratings = family();
        let mut json = serde_json::to_value(&ratings).unwrap();
        let object = json.as_object_mut().unwrap();
        object.remove("tasks");
        object.remove("uncoveredIds");

        let restored: FamilyRatings = serde_json::from_value(json).unwrap();
        assert_eq!(restored.tasks().count(), 0);
        assert!(restored.is_empty());
    }

    #[test]
    fn ratings_round_trip_through_json() {
        let engine = RatingEngine::default();
        let mut ratings = family();
        apply(&engine, &mut ratings, Category::InvisibleParenting, MatchOutcome::MamaWins, Some(9.0));

        let json = serde_json::to_string(&ratings).unwrap();
        let restored: FamilyRatings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.family_id(), ratings.family_id());
        assert_eq!(restored.total_matches(), 1);
        let pair = restored.category(Category::InvisibleParenting).unwrap();
        assert_eq!(pair.mama.display_value(), 1514);
        assert_eq!(pair.papa.display_value(), 1486);
        assert_eq!(restored.task("q1").unwrap().match_count(), 1);
    }
}
