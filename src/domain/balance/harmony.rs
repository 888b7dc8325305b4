//! Harmony Composer - user-facing metrics blended from category balances.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BalanceCalculator, BalanceScore};
use crate::domain::foundation::Percentage;
use crate::domain::survey::Category;

/// Intermediate blends the harmony score is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    /// Average of the two visible categories.
    pub visible: Percentage,
    /// Average of the two invisible categories.
    pub invisible: Percentage,
    /// Invisible parenting on its own.
    pub cognitive: Percentage,
    /// Average of the two household categories.
    pub household: Percentage,
}

/// Top-line metrics shown on the family dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonyMetrics {
    pub overall: Percentage,
    pub task_balance: Percentage,
    pub emotional_load: Percentage,
    pub time_balance: Percentage,
    pub satisfaction: Percentage,
    pub breakdown: BalanceBreakdown,
}

impl HarmonyMetrics {
    /// Every field at the neutral 50.
    pub fn neutral() -> Self {
        let n = Percentage::NEUTRAL;
        Self {
            overall: n,
            task_balance: n,
            emotional_load: n,
            time_balance: n,
            satisfaction: n,
            breakdown: BalanceBreakdown {
                visible: n,
                invisible: n,
                cognitive: n,
                household: n,
            },
        }
    }

    /// Interpretation band of the overall score.
    pub fn level(&self) -> HarmonyLevel {
        HarmonyLevel::from_score(self.overall)
    }
}

/// Interpretation band for a harmony score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyLevel {
    GettingStarted,
    Improving,
    Growing,
    Thriving,
}

impl HarmonyLevel {
    pub fn from_score(score: Percentage) -> Self {
        match score.value() {
            80..=u8::MAX => HarmonyLevel::Thriving,
            60..=79 => HarmonyLevel::Growing,
            40..=59 => HarmonyLevel::Improving,
            _ => HarmonyLevel::GettingStarted,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HarmonyLevel::GettingStarted => "Getting Started",
            HarmonyLevel::Improving => "Improving",
            HarmonyLevel::Growing => "Growing",
            HarmonyLevel::Thriving => "Thriving",
        }
    }
}

impl fmt::Display for HarmonyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Composes harmony metrics from category balance scores.
pub struct HarmonyComposer;

impl HarmonyComposer {
    /// Pure composition; an empty input yields `HarmonyMetrics::neutral()`.
    ///
    /// Each blend is rounded half-up before it feeds the next one, so the
    /// displayed numbers stay stable. Categories missing from `balances`
    /// contribute 50.
    pub fn compose(balances: &[BalanceScore]) -> HarmonyMetrics {
        if balances.is_empty() {
            return HarmonyMetrics::neutral();
        }

        let score = |c: Category| BalanceCalculator::score_for(balances, c).as_u64();
        let vh = score(Category::VisibleHousehold);
        let ih = score(Category::InvisibleHousehold);
        let vp = score(Category::VisibleParenting);
        let ip = score(Category::InvisibleParenting);

        // Integer blends: weights in tenths, averages over halves.
        let task_balance = BalanceCalculator::composite(balances);
        let time_balance = Percentage::from_ratio_rounded(2 * vh + 3 * ih + 2 * vp + 3 * ip, 10);

        let breakdown = BalanceBreakdown {
            visible: Percentage::from_ratio_rounded(vh + vp, 2),
            invisible: Percentage::from_ratio_rounded(ih + ip, 2),
            cognitive: Percentage::from_ratio_rounded(ip, 1),
            household: Percentage::from_ratio_rounded(vh + ih, 2),
        };

        let overall = Percentage::from_ratio_rounded(
            2 * task_balance.as_u64()
                + 2 * breakdown.visible.as_u64()
                + 3 * breakdown.invisible.as_u64()
                + 3 * breakdown.cognitive.as_u64(),
            10,
        );

        HarmonyMetrics {
            overall,
            task_balance,
            emotional_load: breakdown.invisible,
            time_balance,
            satisfaction: task_balance,
            breakdown,
        }
    }
}
