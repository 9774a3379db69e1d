//! Simulator: owns a predictor and its statistics side-by-side.
//!
//! Enforces the per-branch ordering the predictors rely on: every branch is
//! predicted, scored, and trained before the next one is looked at.

use std::io::BufRead;

use tracing::debug;

use super::trace::TraceReader;
use crate::bru::BranchPredictorWrapper;
use crate::common::branch::BranchRecord;
use crate::common::error::{ConfigError, TraceError};
use crate::config::PredictorConfig;
use crate::stats::PredictionStats;

/// Top-level simulator: predictor state + statistics.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// The configured predictor.
    pub predictor: BranchPredictorWrapper,
    /// Statistics gathered so far.
    pub stats: PredictionStats,
}

impl Simulator {
    /// Builds the configured predictor; fails on any configuration error.
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_predictor(BranchPredictorWrapper::init(config)?))
    }

    /// Wraps an already-initialized predictor.
    pub const fn with_predictor(predictor: BranchPredictorWrapper) -> Self {
        Self {
            predictor,
            stats: PredictionStats::new(),
        }
    }

    /// Processes one branch in trace order.
    ///
    /// Conditional branches are predicted, scored, then trained, and the
    /// prediction is returned. Other records are counted and handed to the
    /// predictor, which ignores them.
    pub fn step(&mut self, record: &BranchRecord) -> Option<bool> {
        let prediction = if record.conditional {
            let taken = self
                .predictor
                .predict_branch(record.pc, record.target, true);
            self.stats.record(taken, record.taken);
            Some(taken)
        } else {
            self.stats.record_unconditional();
            None
        };
        self.predictor.train_branch(record);
        prediction
    }

    /// Processes every record of an iterator.
    pub fn run<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a BranchRecord>,
    {
        for record in records {
            let _ = self.step(record);
        }
    }

    /// Processes a trace, stopping at the first unreadable line.
    pub fn run_trace<R: BufRead>(
        &mut self,
        mut reader: TraceReader<R>,
    ) -> Result<(), TraceError> {
        for record in reader.by_ref() {
            let _ = self.step(&record?);
        }
        debug!(
            lines = reader.line(),
            branches = self.stats.branches,
            incorrect = self.stats.incorrect,
            "trace replay finished"
        );
        Ok(())
    }

    /// Releases the predictor and returns the final statistics.
    pub fn finish(self) -> PredictionStats {
        self.predictor.cleanup();
        self.stats
    }
}
