//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction prediction algorithms (static, gshare,
//! tournament, and a perceptron in the custom slot), the building blocks they
//! share (saturating counters, history registers, prediction tables), and the
//! dispatcher that selects one variant at configuration time.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Two-bit saturating counter.
pub mod counter;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Global, local, and path history registers.
pub mod history;

/// Perceptron-based predictor occupying the custom slot.
pub mod perceptron;

/// Static branch predictor (always taken).
pub mod static_bp;

/// Pattern history table of saturating counters.
pub mod table;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

use tracing::{debug, trace};

use self::{
    gshare::GSharePredictor, perceptron::PerceptronPredictor, static_bp::StaticPredictor,
    tournament::TournamentPredictor,
};
use crate::common::branch::BranchRecord;
use crate::common::error::ConfigError;
use crate::config::{BranchPredictor as BpType, PredictorConfig};

/// Enum wrapper for static dispatch of Branch Predictors.
///
/// Holds exactly one active variant, chosen once by `init`. This avoids
/// vtable lookups in the per-branch replay loop.
#[derive(Debug, Clone)]
pub enum BranchPredictorWrapper {
    /// Always-taken baseline.
    Static(StaticPredictor),
    /// PC XOR global history.
    GShare(GSharePredictor),
    /// Local/global with a choice table.
    Tournament(TournamentPredictor),
    /// Perceptron in the custom slot.
    Custom(PerceptronPredictor),
}

impl BranchPredictorWrapper {
    /// Validates the configuration and allocates the selected variant.
    ///
    /// Every counter starts weakly not-taken and every history register is
    /// cleared. Fails before allocating anything if a width is out of range,
    /// the tournament widths disagree, or the storage exceeds the budget.
    pub fn init(config: &PredictorConfig) -> Result<Self, ConfigError> {
        let required = config.validate()?;

        let bp = match config.predictor {
            BpType::Static => Self::Static(StaticPredictor::new()),
            BpType::GShare => Self::GShare(GSharePredictor::new(&config.gshare)),
            BpType::Tournament => Self::Tournament(TournamentPredictor::new(&config.tournament)),
            BpType::Custom => Self::Custom(PerceptronPredictor::new(&config.custom)),
        };

        debug!(
            predictor = bp.name(),
            storage_bits = required,
            budget_bits = config.budget_bits,
            "branch predictor initialized"
        );
        Ok(bp)
    }

    /// Variant selector this dispatcher was built from.
    pub const fn kind(&self) -> BpType {
        match self {
            Self::Static(_) => BpType::Static,
            Self::GShare(_) => BpType::GShare,
            Self::Tournament(_) => BpType::Tournament,
            Self::Custom(_) => BpType::Custom,
        }
    }

    /// Predicts the direction of the branch at `pc`.
    ///
    /// Only conditional branches are meaningfully predicted; filtering other
    /// kinds is the caller's job, so `target` and `is_conditional` are only
    /// traced.
    #[inline]
    pub fn predict_branch(&self, pc: u64, target: u64, is_conditional: bool) -> bool {
        let taken = self.predict(pc);
        trace!(pc, target, is_conditional, taken, "predict");
        taken
    }

    /// Trains the active variant with a resolved branch.
    ///
    /// Non-conditional records leave every table and register untouched.
    #[inline(always)]
    pub fn train_branch(&mut self, record: &BranchRecord) {
        if !record.conditional {
            return;
        }
        match self {
            Self::Static(bp) => bp.train(record),
            Self::GShare(bp) => bp.train(record),
            Self::Tournament(bp) => bp.train(record),
            Self::Custom(bp) => bp.train(record),
        }
    }

    /// Releases every table owned by the active variant.
    ///
    /// Dropping the dispatcher frees the same storage; this form also logs it.
    pub fn cleanup(self) {
        debug!(
            predictor = self.name(),
            storage_bits = self.storage_bits(),
            "branch predictor released"
        );
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict(&self, pc: u64) -> bool {
        match self {
            Self::Static(bp) => bp.predict(pc),
            Self::GShare(bp) => bp.predict(pc),
            Self::Tournament(bp) => bp.predict(pc),
            Self::Custom(bp) => bp.predict(pc),
        }
    }

    /// Same as [`BranchPredictorWrapper::train_branch`].
    #[inline(always)]
    fn train(&mut self, record: &BranchRecord) {
        self.train_branch(record);
    }

    fn storage_bits(&self) -> usize {
        match self {
            Self::Static(bp) => bp.storage_bits(),
            Self::GShare(bp) => bp.storage_bits(),
            Self::Tournament(bp) => bp.storage_bits(),
            Self::Custom(bp) => bp.storage_bits(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Static(bp) => bp.name(),
            Self::GShare(bp) => bp.name(),
            Self::Tournament(bp) => bp.name(),
            Self::Custom(bp) => bp.name(),
        }
    }
}
