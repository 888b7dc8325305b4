//! Application layer - Command and query handlers.

pub mod handlers;
