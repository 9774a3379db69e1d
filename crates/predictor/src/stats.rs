//! Prediction statistics collection and reporting.
//!
//! This module tracks how a predictor fared over a replayed trace:
//! 1. **Volume:** Conditional branches predicted and unconditional records skipped.
//! 2. **Accuracy:** Mispredictions and the misprediction rate (percent).

use std::fmt;

use serde::Serialize;

/// Prediction statistics for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PredictionStats {
    /// Conditional branches predicted.
    pub branches: u64,
    /// Conditional branches whose prediction differed from the outcome.
    pub incorrect: u64,
    /// Non-conditional records seen and not predicted.
    pub unconditional: u64,
}

impl PredictionStats {
    /// Creates an empty statistics record.
    pub const fn new() -> Self {
        Self {
            branches: 0,
            incorrect: 0,
            unconditional: 0,
        }
    }

    /// Scores one conditional prediction against its outcome.
    #[inline]
    pub const fn record(&mut self, predicted: bool, taken: bool) {
        self.branches += 1;
        if predicted != taken {
            self.incorrect += 1;
        }
    }

    /// Counts a record that was not predicted.
    #[inline]
    pub const fn record_unconditional(&mut self) {
        self.unconditional += 1;
    }

    /// Correct predictions.
    pub const fn correct(&self) -> u64 {
        self.branches - self.incorrect
    }

    /// Misprediction rate in percent, or 0 when nothing was predicted.
    pub fn misprediction_rate(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            100.0 * self.incorrect as f64 / self.branches as f64
        }
    }
}

impl fmt::Display for PredictionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branches:        {:>10}", self.branches)?;
        writeln!(f, "Incorrect:       {:>10}", self.incorrect)?;
        writeln!(f, "Misprediction Rate: {:>10.3}", self.misprediction_rate())
    }
}
