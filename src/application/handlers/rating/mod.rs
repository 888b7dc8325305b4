//! Rating command handlers.
//!
//! Every handler here writes a family's rating state and therefore goes
//! through the shared `FamilyLocks`.

mod errors;
mod family_locks;
mod rebuild_ratings;
mod record_match;

pub use errors::RatingCommandError;
pub use family_locks::FamilyLocks;
pub use rebuild_ratings::{RebuildRatingsCommand, RebuildRatingsHandler, RebuildRatingsResult};
pub use record_match::{RecordMatchCommand, RecordMatchHandler, RecordMatchOutcome, SkipReason};
