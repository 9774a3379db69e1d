//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (Choice PHT) to select
//! between a Global predictor and a Local predictor (PAg):
//! 1. **Local:** PC-indexed local history table feeding a history-indexed PHT.
//! 2. **Global:** PHT indexed directly by the global history register.
//! 3. **Choice:** PHT indexed by global (or path) history; its taken side
//!    selects the global component, its not-taken side the local one.

use tracing::trace;

use super::{
    BranchPredictor,
    history::{HistoryRegister, LocalHistoryTable},
    table::PredictionTable,
};
use crate::common::branch::BranchRecord;
use crate::config::{ChoiceIndex, TournamentConfig};

/// Component predictions and the choice made between them for one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentLookup {
    /// Local component prediction.
    pub local: bool,
    /// Global component prediction.
    pub global: bool,
    /// Whether the choice table currently favors the global component.
    pub use_global: bool,
}

impl TournamentLookup {
    /// Prediction of the favored component.
    #[inline]
    pub const fn prediction(self) -> bool {
        if self.use_global {
            self.global
        } else {
            self.local
        }
    }
}

/// Tournament Predictor structure.
#[derive(Debug, Clone)]
pub struct TournamentPredictor {
    /// Global History Register.
    ghr: HistoryRegister,
    /// Path History Register (one address bit per branch).
    path: HistoryRegister,
    /// Register driving the choice table index.
    choice_index: ChoiceIndex,

    /// Local History Table storing history patterns per branch.
    lht: LocalHistoryTable,
    /// Local Pattern History Table indexed by local history patterns.
    local_pht: PredictionTable,
    /// Global Pattern History Table indexed by global history.
    global_pht: PredictionTable,
    /// Choice Prediction Table: not-taken side selects local, taken side global.
    choice_pht: PredictionTable,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor based on the provided configuration.
    ///
    /// The configuration must already be validated.
    pub fn new(config: &TournamentConfig) -> Self {
        Self {
            ghr: HistoryRegister::new(config.global_history_bits),
            path: HistoryRegister::new(config.path_history_bits),
            choice_index: config.choice_index,

            lht: LocalHistoryTable::new(config.pc_index_bits, config.local_history_bits),
            local_pht: PredictionTable::new("local", config.local_history_bits),
            global_pht: PredictionTable::new("global", config.global_history_bits),
            choice_pht: PredictionTable::new("choice", config.choice_bits),
        }
    }

    /// Path bit contributed by a branch: the low bit of its word address.
    #[inline]
    pub const fn path_bit(pc: u64) -> bool {
        (pc >> 2) & 1 != 0
    }

    /// Local PHT index for the branch at `pc`.
    #[inline]
    fn local_index(&self, pc: u64) -> usize {
        self.lht.history(pc) as usize
    }

    /// Global PHT index.
    #[inline]
    fn global_index(&self) -> usize {
        self.ghr.value() as usize
    }

    /// Choice PHT index.
    #[inline]
    pub fn choice_slot(&self) -> usize {
        match self.choice_index {
            ChoiceIndex::GlobalHistory => self.ghr.value() as usize,
            ChoiceIndex::PathHistory => self.path.value() as usize,
        }
    }

    /// Queries both components and the choice table without modifying state.
    #[inline]
    pub fn lookup(&self, pc: u64) -> TournamentLookup {
        TournamentLookup {
            local: self.local_pht.predict(self.local_index(pc)),
            global: self.global_pht.predict(self.global_index()),
            use_global: self.choice_pht.predict(self.choice_slot()),
        }
    }

    /// Global history register.
    pub const fn global_history(&self) -> &HistoryRegister {
        &self.ghr
    }

    /// Path history register.
    pub const fn path_history(&self) -> &HistoryRegister {
        &self.path
    }

    /// Local history table.
    pub const fn local_histories(&self) -> &LocalHistoryTable {
        &self.lht
    }

    /// Local pattern history table.
    pub const fn local_table(&self) -> &PredictionTable {
        &self.local_pht
    }

    /// Global pattern history table.
    pub const fn global_table(&self) -> &PredictionTable {
        &self.global_pht
    }

    /// Choice table.
    pub const fn choice_table(&self) -> &PredictionTable {
        &self.choice_pht
    }
}

impl BranchPredictor for TournamentPredictor {
    /// Queries both Global and Local predictors and uses the Choice PHT to
    /// decide which prediction to use.
    #[inline]
    fn predict(&self, pc: u64) -> bool {
        self.lookup(pc).prediction()
    }

    /// Updates the predictor with the actual branch outcome.
    ///
    /// All indices and component predictions are taken from the pre-update
    /// state. The choice counter only moves when exactly one component was
    /// right; histories are shifted last.
    fn train(&mut self, record: &BranchRecord) {
        let pc = record.pc;
        let taken = record.taken;

        let seen = self.lookup(pc);
        let l_idx = self.local_index(pc);
        let g_idx = self.global_index();
        let c_idx = self.choice_slot();

        self.local_pht.update(l_idx, taken);
        self.lht.shift_in(pc, taken);

        self.global_pht.update(g_idx, taken);

        let local_correct = seen.local == taken;
        let global_correct = seen.global == taken;
        if local_correct != global_correct {
            self.choice_pht.update(c_idx, global_correct);
        }

        self.ghr.shift_in(taken);
        self.path.shift_in(Self::path_bit(pc));

        trace!(
            pc,
            taken,
            local = seen.local,
            global = seen.global,
            use_global = seen.use_global,
            "tournament train"
        );
    }

    fn storage_bits(&self) -> usize {
        self.lht.storage_bits()
            + self.local_pht.storage_bits()
            + self.global_pht.storage_bits()
            + self.choice_pht.storage_bits()
            + self.ghr.storage_bits()
            + self.path.storage_bits()
    }

    fn name(&self) -> &'static str {
        "Tournament"
    }
}
