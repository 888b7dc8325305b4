//! Family Balance - Workload balance and rating engine
//!
//! This crate turns per-question survey answers ("who does this task?") into
//! category balance scores, a harmony composite, and Mama/Papa ELO ratings
//! scaled by task weight.
//!
//! # Layers
//!
//! - `domain` - pure, synchronous computation
//! - `ports` - async traits for survey input, rating state and caching
//! - `adapters` - in-memory port implementations
//! - `application` - command and query handlers
//! - `config` - typed configuration and tracing bootstrap

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
