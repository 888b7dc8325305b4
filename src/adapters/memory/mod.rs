//! In-memory adapters for every port.
//!
//! Suitable for tests and single-process embedding. Nothing is persisted
//! across restarts.

mod balance_cache;
mod match_history;
mod rating_store;
mod survey_store;

pub use balance_cache::InMemoryBalanceCache;
pub use match_history::InMemoryMatchHistory;
pub use rating_store::InMemoryRatingStore;
pub use survey_store::InMemorySurveyStore;
