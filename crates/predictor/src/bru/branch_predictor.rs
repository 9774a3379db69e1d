//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor variant implements. The contract is the one a front end sees:
//! ask for a direction before the branch resolves, then train once the true
//! outcome is known.

use crate::common::branch::BranchRecord;

/// Trait for branch direction prediction algorithms.
///
/// Callers must invoke `predict` for a branch instance before the matching
/// `train`, and must train each branch before predicting the next one.
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    ///
    /// Reads predictor state without modifying it.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    fn predict(&self, pc: u64) -> bool;

    /// Trains the predictor with the resolved branch.
    ///
    /// Index computations use the history as it stood when `predict` was
    /// called; history registers are shifted last.
    ///
    /// # Arguments
    ///
    /// * `record` - The resolved branch, including its outcome and metadata
    fn train(&mut self, record: &BranchRecord);

    /// Total bits held in tables and history registers.
    fn storage_bits(&self) -> usize;

    /// Display name of the algorithm.
    fn name(&self) -> &'static str;
}
