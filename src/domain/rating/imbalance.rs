//! Imbalance Analyzer - reads rating gaps as workload imbalances.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{FamilyRatings, RatingSettings};
use crate::domain::foundation::{Parent, Percentage};
use crate::domain::survey::Category;

/// Most recommendations returned at once.
const MAX_RECOMMENDATIONS: usize = 5;

/// Confidence a category needs before it is recommended on.
const RECOMMENDATION_CONFIDENCE: f64 = 0.5;

/// Rating gap divisor of the task-distribution score.
const GAP_PER_POINT: f64 = 6.0;

/// Most tasks listed in the uncovered-task summary.
const MAX_TOP_UNCOVERED: usize = 10;

/// How far apart a category's ratings are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalanceSeverity {
    Balanced,
    Mild,
    Moderate,
    Severe,
}

impl ImbalanceSeverity {
    pub fn from_gap(gap: f64) -> Self {
        if gap > 200.0 {
            ImbalanceSeverity::Severe
        } else if gap > 100.0 {
            ImbalanceSeverity::Moderate
        } else if gap > 50.0 {
            ImbalanceSeverity::Mild
        } else {
            ImbalanceSeverity::Balanced
        }
    }
}

impl fmt::Display for ImbalanceSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImbalanceSeverity::Balanced => "balanced",
            ImbalanceSeverity::Mild => "mild",
            ImbalanceSeverity::Moderate => "moderate",
            ImbalanceSeverity::Severe => "severe",
        };
        write!(f, "{}", s)
    }
}

/// Rating view of one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImbalance {
    pub category: Category,
    pub mama_rating: f64,
    pub papa_rating: f64,
    pub gap: f64,
    /// `min(1, match_count / confidence_horizon)`.
    pub confidence: f64,
    pub match_count: u32,
    /// `None` while the gap is within the tie band.
    pub leader: Option<Parent>,
    pub severity: ImbalanceSeverity,
}

/// A category where one parent carries noticeably more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecommendation {
    pub category: Category,
    pub overloaded: Parent,
    pub underloaded: Parent,
    pub severity: ImbalanceSeverity,
    /// Overloaded parent's share of the combined rating.
    pub leader_share: Percentage,
    pub gap: f64,
    pub confidence: f64,
}

/// Rating view of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskImbalance {
    pub task: String,
    pub category: Category,
    pub mama_rating: f64,
    pub papa_rating: f64,
    pub gap: f64,
    pub confidence: f64,
    pub match_count: u32,
    pub leader: Option<Parent>,
    pub severity: ImbalanceSeverity,
    pub both_count: u32,
    pub neither_count: u32,
    /// More "nobody" answers than matches.
    pub is_uncovered: bool,
}

/// One task nobody does, with its "nobody" answer count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncoveredTask {
    pub task: String,
    pub category: Category,
    pub count: u32,
}

/// "Nobody" answers across a family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncoveredTasks {
    pub by_category: BTreeMap<Category, u32>,
    pub total: u32,
    /// Up to ten tasks, most "nobody" answers first.
    pub top: Vec<UncoveredTask>,
}

/// Derives imbalances and recommendations from rating state.
#[derive(Debug, Clone, Default)]
pub struct ImbalanceAnalyzer {
    settings: RatingSettings,
}

impl ImbalanceAnalyzer {
    pub fn new(settings: RatingSettings) -> Self {
        Self { settings }
    }

    /// `min(1, match_count / horizon)`.
    pub fn confidence(&self, match_count: u32) -> f64 {
        if self.settings.confidence_horizon == 0 {
            return 1.0;
        }
        (f64::from(match_count) / f64::from(self.settings.confidence_horizon)).min(1.0)
    }

    /// Imbalance entry for every category.
    ///
    /// Categories without matches report the initial ratings, zero
    /// confidence and no leader.
    pub fn analyze(&self, ratings: &FamilyRatings) -> BTreeMap<Category, CategoryImbalance> {
        Category::ALL
            .iter()
            .map(|&category| {
                let pair = ratings.category_or_initial(category, self.settings.initial_rating);
                let gap = pair.gap();
                let imbalance = CategoryImbalance {
                    category,
                    mama_rating: pair.mama.value,
                    papa_rating: pair.papa.value,
                    gap,
                    confidence: self.confidence(pair.match_count()),
                    match_count: pair.match_count(),
                    leader: pair.leader(self.settings.tie_band),
                    severity: ImbalanceSeverity::from_gap(gap),
                };
                (category, imbalance)
            })
            .collect()
    }

    /// Imbalance entry for every answered task, largest gap first.
    ///
    /// With `category` set, only tasks last answered in that category are
    /// listed. Equal gaps keep task key order.
    pub fn task_imbalances(
        &self,
        ratings: &FamilyRatings,
        category: Option<Category>,
    ) -> Vec<TaskImbalance> {
        let mut imbalances: Vec<TaskImbalance> = ratings
            .tasks()
            .filter(|(_, task)| category.map_or(true, |c| task.category == c))
            .map(|(key, task)| {
                let pair = &task.pair;
                let gap = pair.gap();
                TaskImbalance {
                    task: key.to_string(),
                    category: task.category,
                    mama_rating: pair.mama.value,
                    papa_rating: pair.papa.value,
                    gap,
                    confidence: self.confidence(task.match_count()),
                    match_count: task.match_count(),
                    leader: pair.leader(self.settings.tie_band),
                    severity: ImbalanceSeverity::from_gap(gap),
                    both_count: task.both_count,
                    neither_count: task.neither_count,
                    is_uncovered: task.is_uncovered(),
                }
            })
            .collect();

        imbalances.sort_by(|a, b| b.gap.total_cmp(&a.gap));
        imbalances
    }

    /// "Nobody" answer counts per category, overall, and for the worst tasks.
    pub fn uncovered_tasks(&self, ratings: &FamilyRatings) -> UncoveredTasks {
        let mut summary = UncoveredTasks::default();
        for (key, task) in ratings.tasks().filter(|(_, t)| t.neither_count > 0) {
            *summary.by_category.entry(task.category).or_insert(0) += task.neither_count;
            summary.total = summary.total.saturating_add(task.neither_count);
            summary.top.push(UncoveredTask {
                task: key.to_string(),
                category: task.category,
                count: task.neither_count,
            });
        }
        summary.top.sort_by(|a, b| b.count.cmp(&a.count));
        summary.top.truncate(MAX_TOP_UNCOVERED);
        summary
    }

    /// `max(0, round(100 - avgGap / 6))` over categories with matches,
    /// or 50 when none have any.
    pub fn task_distribution_score(
        &self,
        imbalances: &BTreeMap<Category, CategoryImbalance>,
    ) -> Percentage {
        let gaps: Vec<f64> = imbalances
            .values()
            .filter(|i| i.match_count > 0)
            .map(|i| i.gap)
            .collect();
        if gaps.is_empty() {
            return Percentage::NEUTRAL;
        }
        let avg_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;
        Percentage::from_f64_rounded(100.0 - avg_gap / GAP_PER_POINT)
    }

    /// Up to five confident, led categories, largest gap first.
    pub fn recommendations(
        &self,
        imbalances: &BTreeMap<Category, CategoryImbalance>,
    ) -> Vec<TaskRecommendation> {
        let mut recommendations: Vec<TaskRecommendation> = imbalances
            .values()
            .filter(|i| i.confidence > RECOMMENDATION_CONFIDENCE)
            .filter_map(|i| {
                let leader = i.leader?;
                let leader_rating = match leader {
                    Parent::Mama => i.mama_rating,
                    Parent::Papa => i.papa_rating,
                };
                let combined = i.mama_rating + i.papa_rating;
                let leader_share = if combined > 0.0 {
                    Percentage::from_f64_rounded(100.0 * leader_rating / combined)
                } else {
                    Percentage::NEUTRAL
                };
                Some(TaskRecommendation {
                    category: i.category,
                    overloaded: leader,
                    underloaded: leader.other(),
                    severity: i.severity,
                    leader_share,
                    gap: i.gap,
                    confidence: i.confidence,
                })
            })
            .collect();

        recommendations.sort_by(|a, b| b.gap.total_cmp(&a.gap));
        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}
