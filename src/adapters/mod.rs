//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory implementations of every port

pub mod memory;

pub use memory::{InMemoryBalanceCache, InMemoryMatchHistory, InMemoryRatingStore, InMemorySurveyStore};
