//! Trace-driven branch direction predictor library.
//!
//! This crate models the direction predictor of a pipelined front end under a
//! fixed hardware storage budget. It provides:
//! 1. **Predictors:** Static, gshare, tournament (local/global/choice), and a
//!    perceptron in the custom slot, all behind one dispatcher.
//! 2. **Configuration:** Variant selection, table widths, and the storage budget.
//! 3. **Simulation:** Trace parsing and an in-order predict-then-train replay loop.
//! 4. **Statistics:** Branch and misprediction counts for a replayed trace.

/// Branch prediction unit: counters, histories, tables, and predictor variants.
pub mod bru;
/// Shared error types.
pub mod common;
/// Predictor configuration (defaults, variant selector, width parameters).
pub mod config;
/// Trace parsing and the replay simulator.
pub mod sim;
/// Prediction statistics collection and reporting.
pub mod stats;

/// Dispatcher over the configured predictor variant; build with `BranchPredictorWrapper::init`.
pub use crate::bru::{BranchPredictor, BranchPredictorWrapper};
/// Error types for configuration and trace input.
pub use crate::common::error::{ConfigError, TraceError};
/// Root configuration type; use `PredictorConfig::default()`, a selector string, or JSON.
pub use crate::config::PredictorConfig;
/// One branch event as seen by the predictor.
pub use crate::common::branch::BranchRecord;
/// Replay loop tying a predictor to its statistics.
pub use crate::sim::simulator::Simulator;
/// Prediction statistics for a replayed trace.
pub use crate::stats::PredictionStats;
