//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `survey` - Question classification, answer normalization, tallies, task weights
//! - `balance` - Balance scores and the harmony composite
//! - `rating` - Mama/Papa ELO ratings, imbalance analysis, weight statistics
//!
//! Everything in this layer is synchronous and free of I/O.

pub mod balance;
pub mod foundation;
pub mod rating;
pub mod survey;
