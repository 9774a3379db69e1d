//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts without a second, PC-indexed dimension.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `train()`: O(1)
//! - **Space Complexity:** O(2^W) where W is the history width (15 bits = 64 Kbit of 2-bit counters)
//! - **Hardware Cost:** Single PHT lookup, XOR, and counter update
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Many hot branches aliasing onto the same PC ^ history index

use tracing::trace;

use super::{BranchPredictor, history::HistoryRegister, table::PredictionTable};
use crate::common::branch::BranchRecord;
use crate::config::GShareConfig;

/// GShare Predictor structure.
#[derive(Debug, Clone)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: HistoryRegister,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: PredictionTable,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor.
    ///
    /// The configuration must already be validated.
    pub fn new(config: &GShareConfig) -> Self {
        Self {
            ghr: HistoryRegister::new(config.history_bits),
            pht: PredictionTable::new("gshare", config.history_bits),
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// `(pc & mask) ^ (ghr & mask)` with `mask = 2^W - 1`.
    #[inline]
    pub fn index(&self, pc: u64) -> usize {
        let mask = self.ghr.mask();
        ((pc & mask) ^ (self.ghr.value() & mask)) as usize
    }

    /// Current global history.
    pub const fn history(&self) -> &HistoryRegister {
        &self.ghr
    }

    /// Pattern history table.
    pub const fn table(&self) -> &PredictionTable {
        &self.pht
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns the prediction of the counter at the hashed index.
    #[inline]
    fn predict(&self, pc: u64) -> bool {
        self.pht.predict(self.index(pc))
    }

    /// Updates the 2-bit saturating counter in the PHT and shifts the new
    /// outcome into the Global History Register.
    #[inline]
    fn train(&mut self, record: &BranchRecord) {
        let idx = self.index(record.pc);
        self.pht.update(idx, record.taken);
        self.ghr.shift_in(record.taken);
        trace!(pc = record.pc, idx, taken = record.taken, ghr = %self.ghr, "gshare train");
    }

    fn storage_bits(&self) -> usize {
        self.pht.storage_bits() + self.ghr.storage_bits()
    }

    fn name(&self) -> &'static str {
        "Gshare"
    }
}
