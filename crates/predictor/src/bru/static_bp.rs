//! Static Branch Predictor.
//!
//! Implements a simple "Always Taken" prediction policy for conditional
//! branches. It keeps no state, so training is a no-op and its storage cost is
//! zero. Serves as the baseline and fallback variant.

use super::BranchPredictor;
use crate::common::branch::BranchRecord;

/// Static Branch Predictor structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    /// Always predicts taken.
    fn predict(&self, _pc: u64) -> bool {
        true
    }

    /// Does not maintain any direction history.
    fn train(&mut self, _record: &BranchRecord) {}

    fn storage_bits(&self) -> usize {
        0
    }

    fn name(&self) -> &'static str {
        "Static"
    }
}
