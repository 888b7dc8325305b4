//! Balance Calculator - how evenly each category's work is split.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;
use crate::domain::survey::{Category, CategoryTally, WeightedTally};

/// Symmetric 0-100 balance of one category: 100 is an even split, 0 is one
/// parent doing everything.
///
/// Recomputed from tallies on every read; never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceScore {
    pub category: Category,
    pub value: Percentage,
}

impl BalanceScore {
    pub fn new(category: Category, value: Percentage) -> Self {
        Self { category, value }
    }

    /// A neutral score for a category without data.
    pub fn neutral(category: Category) -> Self {
        Self::new(category, Percentage::NEUTRAL)
    }
}

/// Directional split of one category's work between the parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub category: Category,
    pub mama_share: Percentage,
    pub papa_share: Percentage,
}

/// Stateless balance computations.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Unrounded balance for the given Mama/Papa work totals.
    ///
    /// No work at all counts as balanced (50), so composites stay defined.
    pub fn raw_score(mama_total: f64, papa_total: f64) -> f64 {
        let total = mama_total + papa_total;
        if total <= 0.0 || !total.is_finite() {
            return 50.0;
        }
        // |mamaPct - 50| written as 50*|m - p|/total, which is exactly symmetric.
        let imbalance = 50.0 * (mama_total - papa_total).abs() / total;
        (100.0 - 2.0 * imbalance).clamp(0.0, 100.0)
    }

    /// Balance score of one category from answer counts.
    ///
    /// Works in half-answer units so exact halves round up without float
    /// error: `100 * (total - |mama - papa|) / total`.
    pub fn balance(tally: &CategoryTally) -> BalanceScore {
        let both = u64::from(tally.both);
        let mama = 2 * u64::from(tally.mama) + both;
        let papa = 2 * u64::from(tally.papa) + both;
        let total = mama + papa;
        let value = Percentage::from_ratio_rounded(100 * (total - mama.abs_diff(papa)), total);
        BalanceScore::new(tally.category, value)
    }

    /// Balance score of one category from weight sums.
    pub fn balance_weighted(tally: &WeightedTally) -> BalanceScore {
        let (mama, papa) = tally.totals();
        BalanceScore::new(tally.category, Percentage::from_f64_rounded(Self::raw_score(mama, papa)))
    }

    /// Balance scores for a set of tallies, in the same order.
    pub fn balance_all(tallies: &[CategoryTally]) -> Vec<BalanceScore> {
        tallies.iter().map(Self::balance).collect()
    }

    /// Looks up a category's score, falling back to neutral when absent.
    pub fn score_for(balances: &[BalanceScore], category: Category) -> Percentage {
        balances
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.value)
            .unwrap_or(Percentage::NEUTRAL)
    }

    /// Weighted composite balance across the four categories: invisible
    /// categories weigh 0.3, visible 0.2. Summed in tenths so an exact .5
    /// rounds up.
    pub fn composite(balances: &[BalanceScore]) -> Percentage {
        let tenths: u64 = Category::ALL
            .iter()
            .map(|c| c.composite_tenths() * Self::score_for(balances, *c).as_u64())
            .sum();
        Percentage::from_ratio_rounded(tenths, 10)
    }

    /// Which parent carries how much of a category, as whole percentages
    /// summing to 100. An empty tally is split 50/50.
    pub fn distribution(tally: &WeightedTally) -> CategoryDistribution {
        let (mama, papa) = tally.totals();
        let total = mama + papa;
        let mama_share = if total > 0.0 {
            Percentage::from_f64_rounded(100.0 * mama / total)
        } else {
            Percentage::NEUTRAL
        };
        CategoryDistribution {
            category: tally.category,
            mama_share,
            papa_share: Percentage::new(100 - mama_share.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vh(mama: u32, papa: u32, both: u32) -> CategoryTally {
        CategoryTally::new(Category::VisibleHousehold, mama, papa, both)
    }

    #[test]
    fn empty_tally_is_neutral() {
        assert_eq!(BalanceCalculator::balance(&vh(0, 0, 0)).value, Percentage::NEUTRAL);
    }

    #[test]
    fn even_split_scores_100() {
        assert_eq!(BalanceCalculator::balance(&vh(1, 1, 1)).value.value(), 100);
        assert_eq!(BalanceCalculator::balance(&vh(0, 0, 4)).value.value(), 100);
    }

    #[test]
    fn one_sided_split_scores_0() {
        assert_eq!(BalanceCalculator::balance(&vh(7, 0, 0)).value.value(), 0);
        assert_eq!(BalanceCalculator::balance(&vh(0, 3, 0)).value.value(), 0);
    }

    #[test]
    fn fifteen_to_three_scores_33() {
        // mamaPct 83.3, imbalance 33.3, 100 - 66.7
        assert_eq!(BalanceCalculator::balance(&vh(15, 3, 0)).value.value(), 33);
    }

    #[test]
    fn weighted_balance_uses_weight_sums() {
        let tally = WeightedTally {
            category: Category::InvisibleParenting,
            mama: 9.0,
            papa: 3.0,
            both: 0.0,
        };
        // mamaPct 75 -> imbalance 25 -> 50
        assert_eq!(BalanceCalculator::balance_weighted(&tally).value.value(), 50);
    }

    #[test]
    fn composite_weights_invisible_work_higher() {
        let balances = vec![
            BalanceScore::new(Category::VisibleHousehold, Percentage::new(100)),
            BalanceScore::new(Category::InvisibleHousehold, Percentage::new(0)),
            BalanceScore::new(Category::VisibleParenting, Percentage::new(100)),
            BalanceScore::new(Category::InvisibleParenting, Percentage::new(0)),
        ];
        assert_eq!(BalanceCalculator::composite(&balances).value(), 40);
    }

    #[test]
    fn balance_rounds_exact_halves_up() {
        // mama 7, papa 1: imbalance 37.5 -> score 25; mama 9, papa 7: 100 - 12.5 = 87.5 -> 88
        assert_eq!(BalanceCalculator::balance(&vh(7, 1, 0)).value.value(), 25);
        assert_eq!(BalanceCalculator::balance(&vh(9, 7, 0)).value.value(), 88);
        // one shared answer against one Mama answer: 1.5 vs 0.5 -> 50
        assert_eq!(BalanceCalculator::balance(&vh(1, 0, 1)).value.value(), 50);
    }

    #[test]
    fn composite_rounds_exact_halves_up() {
        // 0.2*0 + 0.3*31 + 0.2*50 + 0.3*24 = 26.5
        let balances = vec![
            BalanceScore::new(Category::VisibleHousehold, Percentage::new(0)),
            BalanceScore::new(Category::InvisibleHousehold, Percentage::new(31)),
            BalanceScore::new(Category::VisibleParenting, Percentage::new(50)),
            BalanceScore::new(Category::InvisibleParenting, Percentage::new(24)),
        ];
        assert_eq!(BalanceCalculator::composite(&balances).value(), 27);
    }

    #[test]
    fn composite_treats_missing_categories_as_neutral() {
        assert_eq!(BalanceCalculator::composite(&[]), Percentage::NEUTRAL);
        let only_one = vec![BalanceScore::new(Category::InvisibleParenting, Percentage::new(100))];
        // 0.2*50 + 0.3*50 + 0.2*50 + 0.3*100
        assert_eq!(BalanceCalculator::composite(&only_one).value(), 65);
    }

    #[test]
    fn distribution_is_directional_and_sums_to_100() {
        let dist = BalanceCalculator::distribution(&WeightedTally::from(&vh(15, 3, 0)));
        assert_eq!(dist.mama_share.value(), 83);
        assert_eq!(dist.papa_share.value(), 17);

        let halves = BalanceCalculator::distribution(&WeightedTally::from(&vh(1, 7, 0)));
        assert_eq!(halves.mama_share.value(), 13);
        assert_eq!(halves.papa_share.value(), 87);

        let empty = BalanceCalculator::distribution(&WeightedTally::from(&vh(0, 0, 0)));
        assert_eq!(empty.mama_share, Percentage::NEUTRAL);
        assert_eq!(empty.papa_share, Percentage::NEUTRAL);
    }

    proptest! {
        #[test]
        fn balance_is_symmetric(a in 0u32..500, b in 0u32..500, c in 0u32..500) {
            prop_assert_eq!(
                BalanceCalculator::balance(&vh(a, b, c)).value,
                BalanceCalculator::balance(&vh(b, a, c)).value
            );
        }

        #[test]
        fn balance_is_bounded(a in 0u32..10_000, b in 0u32..10_000, c in 0u32..10_000) {
            let raw = BalanceCalculator::raw_score(
                f64::from(a) + 0.5 * f64::from(c),
                f64::from(b) + 0.5 * f64::from(c),
            );
            prop_assert!((0.0..=100.0).contains(&raw));
            prop_assert!(BalanceCalculator::balance(&vh(a, b, c)).value.value() <= 100);
        }

        #[test]
        fn composite_matches_exact_half_up(
            vh_score in 0u8..=100, ih in 0u8..=100, vp in 0u8..=100, ip in 0u8..=100
        ) {
            let balances = vec![
                BalanceScore::new(Category::VisibleHousehold, Percentage::new(vh_score)),
                BalanceScore::new(Category::InvisibleHousehold, Percentage::new(ih)),
                BalanceScore::new(Category::VisibleParenting, Percentage::new(vp)),
                BalanceScore::new(Category::InvisibleParenting, Percentage::new(ip)),
            ];
            let tenths = 2 * u32::from(vh_score) + 3 * u32::from(ih) + 2 * u32::from(vp) + 3 * u32::from(ip);
            let expected = (tenths + 5) / 10;
            prop_assert_eq!(u32::from(BalanceCalculator::composite(&balances).value()), expected);
        }
    }
}
