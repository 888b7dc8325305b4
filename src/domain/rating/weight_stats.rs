//! Weight statistics over a family's match history.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{MatchOutcome, MatchRecord, NEUTRAL_MATCH_WEIGHT};
use crate::domain::foundation::Parent;

/// A per-parent weight sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentTotals {
    pub mama: f64,
    pub papa: f64,
}

impl ParentTotals {
    pub fn get(&self, parent: Parent) -> f64 {
        match parent {
            Parent::Mama => self.mama,
            Parent::Papa => self.papa,
        }
    }
}

/// A per-parent count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentCounts {
    pub mama: u32,
    pub papa: u32,
}

impl ParentCounts {
    pub fn get(&self, parent: Parent) -> u32 {
        match parent {
            Parent::Mama => self.mama,
            Parent::Papa => self.papa,
        }
    }
}

/// Who carries the heavy tasks, measured by match weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightStatistics {
    /// Sum of weights of matches each parent won; ties split half/half.
    pub total_weighted_load: ParentTotals,
    /// Outright wins with weight above the high-weight threshold.
    pub high_weight_wins: ParentCounts,
    /// Mean match weight, neutral when there are no matches.
    pub average_weight: f64,
    /// Match count per whole-number weight bucket.
    pub distribution: BTreeMap<u8, u32>,
    pub match_count: u32,
}

impl WeightStatistics {
    pub fn from_matches(matches: &[MatchRecord], high_weight_threshold: f64) -> Self {
        let mut load = ParentTotals::default();
        let mut wins = ParentCounts::default();
        let mut distribution = BTreeMap::new();
        let mut weight_sum = 0.0;

        for record in matches {
            let weight = record.weight;
            weight_sum += weight;
            *distribution.entry(weight.floor().clamp(0.0, 255.0) as u8).or_insert(0) += 1;

            let high = weight > high_weight_threshold;
            match record.outcome {
                MatchOutcome::MamaWins => {
                    load.mama += weight;
                    if high {
                        wins.mama += 1;
                    }
                }
                MatchOutcome::PapaWins => {
                    load.papa += weight;
                    if high {
                        wins.papa += 1;
                    }
                }
                MatchOutcome::Tie => {
                    load.mama += weight / 2.0;
                    load.papa += weight / 2.0;
                }
            }
        }

        let match_count = u32::try_from(matches.len()).unwrap_or(u32::MAX);
        let average_weight = if matches.is_empty() {
            NEUTRAL_MATCH_WEIGHT
        } else {
            weight_sum / matches.len() as f64
        };

        Self {
            total_weighted_load: load,
            high_weight_wins: wins,
            average_weight,
            distribution,
            match_count,
        }
    }
}
