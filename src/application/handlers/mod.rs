//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports.
//!
//! - `rating` - Commands that write rating state (serialized per family)
//! - `reporting` - Read-only queries consumed by dashboards

pub mod rating;
pub mod reporting;
