//! # Unit Tests
//!
//! Fine-grained tests grouped by library module.

/// Branch prediction unit: counters, histories, variants, and the dispatcher.
pub mod bru;

/// Configuration defaults, JSON loading, selector parsing, and validation.
pub mod config;

/// Trace parsing and the replay simulator.
pub mod sim;
