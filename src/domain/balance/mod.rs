//! Balance module - category balance scores and the harmony composite.
//!
//! Everything here is a pure recomputation from tallies; nothing is stored.

mod calculator;
mod content_hash;
mod harmony;

pub use calculator::{BalanceCalculator, BalanceScore, CategoryDistribution};
pub use content_hash::ContentHash;
pub use harmony::{BalanceBreakdown, HarmonyComposer, HarmonyLevel, HarmonyMetrics};
