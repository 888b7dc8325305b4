//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Input
//!
//! - `SurveyResponseReader` - Survey answers and question weights per family
//!
//! ## Rating State
//!
//! - `RatingStore` - Persisted `FamilyRatings`
//! - `MatchHistory` - Append-only match log and replay guard
//!
//! ## Optimisation
//!
//! - `BalanceCache` - Harmony metrics keyed by input content hash

mod balance_cache;
mod match_history;
mod rating_store;
mod survey_response_reader;

pub use balance_cache::{BalanceCache, BalanceCacheError};
pub use match_history::{MatchHistory, MatchHistoryError};
pub use rating_store::{RatingStore, RatingStoreError};
pub use survey_response_reader::{SurveyReaderError, SurveyResponseReader};
