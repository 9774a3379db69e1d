//! Trace replay.
//!
//! Parses branch traces and drives a predictor through them in program order.

/// Predict-then-train replay loop.
pub mod simulator;

/// Text trace parsing.
pub mod trace;
