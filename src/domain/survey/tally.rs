//! Response Tally Aggregator - counts answers per category.
//!
//! Tallies are re-derived from the full response set on every pass, never
//! patched incrementally, so edited or deleted answers cannot leave drift.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{normalize_answer, Answer, Category, QuestionClassifier, QuestionWeights, SurveyResponse};

/// Answer counts for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub category: Category,
    pub mama: u32,
    pub papa: u32,
    pub both: u32,
}

impl CategoryTally {
    /// An empty tally.
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            mama: 0,
            papa: 0,
            both: 0,
        }
    }

    /// Creates a tally with explicit counts.
    pub fn new(category: Category, mama: u32, papa: u32, both: u32) -> Self {
        Self {
            category,
            mama,
            papa,
            both,
        }
    }

    /// Counts one answer; `Unknown` is ignored.
    pub fn record(&mut self, answer: Answer) {
        match answer {
            Answer::Mama => self.mama += 1,
            Answer::Papa => self.papa += 1,
            Answer::Both => self.both += 1,
            Answer::Neither | Answer::Unknown => {}
        }
    }

    /// Number of counted answers.
    pub fn total(&self) -> u32 {
        self.mama + self.papa + self.both
    }

    /// Mama and Papa shares of the work, with shared answers split in half.
    pub fn totals(&self) -> (f64, f64) {
        WeightedTally::from(self).totals()
    }
}

/// Weight-summed answers for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedTally {
    pub category: Category,
    pub mama: f64,
    pub papa: f64,
    pub both: f64,
}

impl WeightedTally {
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            mama: 0.0,
            papa: 0.0,
            both: 0.0,
        }
    }

    /// Adds one answer carrying the given weight; `Unknown` is ignored.
    pub fn record(&mut self, answer: Answer, weight: f64) {
        match answer {
            Answer::Mama => self.mama += weight,
            Answer::Papa => self.papa += weight,
            Answer::Both => self.both += weight,
            Answer::Neither | Answer::Unknown => {}
        }
    }

    /// Mama and Papa shares of the work, with shared answers split in half.
    pub fn totals(&self) -> (f64, f64) {
        (self.mama + 0.5 * self.both, self.papa + 0.5 * self.both)
    }
}

impl From<&CategoryTally> for WeightedTally {
    fn from(tally: &CategoryTally) -> Self {
        Self {
            category: tally.category,
            mama: f64::from(tally.mama),
            papa: f64::from(tally.papa),
            both: f64::from(tally.both),
        }
    }
}

/// Aggregates survey responses into per-category tallies.
#[derive(Debug, Clone, Default)]
pub struct TallyAggregator {
    classifier: QuestionClassifier,
}

impl TallyAggregator {
    pub fn new(classifier: QuestionClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &QuestionClassifier {
        &self.classifier
    }

    /// Counts answers per category.
    ///
    /// Returns one tally per category in `Category::ALL` order, including
    /// empty ones. Unknown answers and unclassified questions are skipped.
    pub fn aggregate(&self, responses: &[SurveyResponse]) -> Vec<CategoryTally> {
        let mut tallies: Vec<CategoryTally> =
            Category::ALL.iter().map(|c| CategoryTally::empty(*c)).collect();

        let mut counted = 0usize;
        for (_, category, answer) in self.countable(responses) {
            if let Some(tally) = tallies.iter_mut().find(|t| t.category == category) {
                tally.record(answer);
                counted += 1;
            }
        }

        debug!(
            total = responses.len(),
            counted,
            skipped = responses.len() - counted,
            "Aggregated survey responses"
        );
        tallies
    }

    /// Sums question weights per category instead of counting answers.
    pub fn aggregate_weighted(
        &self,
        responses: &[SurveyResponse],
        weights: &QuestionWeights,
    ) -> Vec<WeightedTally> {
        let mut tallies: Vec<WeightedTally> =
            Category::ALL.iter().map(|c| WeightedTally::empty(*c)).collect();

        for (response, category, answer) in self.countable(responses) {
            let weight = weights.weight_for(&response.question_id).value();
            if let Some(tally) = tallies.iter_mut().find(|t| t.category == category) {
                tally.record(answer, weight);
            }
        }
        tallies
    }

    fn countable<'a>(
        &'a self,
        responses: &'a [SurveyResponse],
    ) -> impl Iterator<Item = (&'a SurveyResponse, Category, Answer)> + 'a {
        responses.iter().filter_map(move |response| {
            let answer = normalize_answer(&response.answer);
            if !answer.is_known() {
                return None;
            }
            let category = self.classifier.classify_response(response)?;
            Some((response, category, answer))
        })
    }
}
