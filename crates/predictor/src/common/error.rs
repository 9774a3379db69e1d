//! Configuration and trace error definitions.
//!
//! This module defines the two failure families of the simulator:
//! 1. **Configuration errors:** Unsupported selectors, bad widths, and storage
//!    budget violations. All are fatal and surface before any prediction.
//! 2. **Trace errors:** I/O failures and malformed trace lines.
//!
//! Invalid counter states are not errors: they are reported through `tracing`
//! and degrade to a not-taken prediction.

use std::io;

use thiserror::Error;

/// Errors raised while building or validating a predictor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The predictor selector string names no known variant or is malformed.
    #[error("unsupported predictor selector '{0}'")]
    InvalidSelector(String),

    /// A width parameter is zero or larger than the supported maximum.
    #[error("invalid width for {field}: {bits} bits (expected 1..={max})")]
    InvalidWidth {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Configured width in bits.
        bits: usize,
        /// Largest accepted width for this field.
        max: usize,
    },

    /// Choice and global tables of the tournament predictor disagree on width.
    #[error("choice table width ({choice} bits) must match global history width ({global} bits)")]
    MismatchedWidths {
        /// Configured choice table index width.
        choice: usize,
        /// Configured global history width.
        global: usize,
    },

    /// The choice table is driven by path history of a different width.
    #[error("choice table width ({choice} bits) must match path history width ({path} bits)")]
    PathWidthMismatch {
        /// Configured choice table index width.
        choice: usize,
        /// Configured path history width.
        path: usize,
    },

    /// The configured tables and registers need more bits than the budget allows.
    #[error("predictor needs {required} bits of storage, budget is {budget} bits")]
    BudgetExceeded {
        /// Total storage required by the configuration.
        required: usize,
        /// Configured hardware budget.
        budget: usize,
    },

    /// The JSON configuration could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("could not read configuration: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while reading a branch trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("trace I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be parsed as a branch record.
    #[error("trace line {line}: {reason}")]
    Parse {
        /// 1-based line number in the trace.
        line: usize,
        /// Human-readable description of the problem.
        reason: String,
    },
}
