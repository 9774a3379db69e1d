//! Configuration system for the branch predictor simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the predictor. It provides:
//! 1. **Defaults:** Baseline widths sized for a 64 Kbit + 1 Kbit budget.
//! 2. **Structures:** Per-variant width parameters and the root `PredictorConfig`.
//! 3. **Validation:** Width bounds, tournament width consistency, and storage accounting.
//! 4. **Loading:** JSON (file or string) and compact selector strings such as `gshare:13`.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::bru::counter::SaturatingCounter;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Hardware budget: 64 Kbit of tables plus 1 Kbit of history state.
    pub const BUDGET_BITS: usize = 64 * 1024 + 1024;

    /// Default gshare global history width (32768-entry table).
    pub const GSHARE_HISTORY_BITS: usize = 15;

    /// Default tournament global history width (4096-entry global table).
    pub const TOURNAMENT_GLOBAL_HISTORY_BITS: usize = 12;

    /// Default tournament local history width (1024-entry local table).
    pub const TOURNAMENT_LOCAL_HISTORY_BITS: usize = 10;

    /// Default tournament PC index width (1024 local histories).
    pub const TOURNAMENT_PC_INDEX_BITS: usize = 10;

    /// Default tournament choice table width (4096 entries).
    pub const TOURNAMENT_CHOICE_BITS: usize = 12;

    /// Default tournament path history width.
    pub const TOURNAMENT_PATH_HISTORY_BITS: usize = 12;

    /// Default perceptron global history length.
    pub const PERCEPTRON_HISTORY: usize = 31;

    /// Default perceptron table size (log2, 256 rows).
    pub const PERCEPTRON_TABLE_BITS: usize = 8;
}

/// Largest index width accepted for any prediction table.
pub const MAX_TABLE_BITS: usize = 24;

/// Largest width accepted for a history register.
pub const MAX_HISTORY_BITS: usize = 64;

/// Largest perceptron history length (one register bit per weight).
pub const MAX_PERCEPTRON_HISTORY: usize = 62;

/// Width of a single perceptron weight in bits.
pub const PERCEPTRON_WEIGHT_BITS: usize = 8;

/// Branch prediction algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Static predictor (always predict taken).
    #[default]
    Static,
    /// Global history predictor indexed by PC XOR history.
    #[serde(alias = "Gshare", alias = "GSHARE")]
    GShare,
    /// Tournament predictor choosing between local and global components.
    Tournament,
    /// Custom slot, filled by a perceptron predictor.
    #[serde(alias = "Perceptron")]
    Custom,
}

/// Register used to index the tournament choice table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ChoiceIndex {
    /// Index by the global outcome history.
    #[default]
    GlobalHistory,
    /// Index by the path history register.
    PathHistory,
}

/// Root configuration structure containing all predictor settings.
///
/// # Examples
///
/// ```
/// use bpsim_core::config::{BranchPredictor, PredictorConfig};
///
/// let json = r#"{ "predictor": "GShare", "gshare": { "history_bits": 13 } }"#;
/// let config = PredictorConfig::from_json(json).unwrap();
/// assert_eq!(config.predictor, BranchPredictor::GShare);
/// assert_eq!(config.gshare.history_bits, 13);
/// assert_eq!(config.storage_bits(), (1 << 13) * 2 + 13);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Active predictor variant
    #[serde(default)]
    pub predictor: BranchPredictor,

    /// Total bits available to tables and history registers
    #[serde(default = "PredictorConfig::default_budget")]
    pub budget_bits: usize,

    /// Gshare predictor configuration
    #[serde(default)]
    pub gshare: GShareConfig,

    /// Tournament predictor configuration
    #[serde(default)]
    pub tournament: TournamentConfig,

    /// Custom (perceptron) predictor configuration
    #[serde(default)]
    pub custom: PerceptronConfig,
}

impl PredictorConfig {
    /// Returns the default hardware budget in bits.
    const fn default_budget() -> usize {
        defaults::BUDGET_BITS
    }

    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Storage required by the active variant, in bits.
    pub fn storage_bits(&self) -> usize {
        match self.predictor {
            BranchPredictor::Static => 0,
            BranchPredictor::GShare => self.gshare.storage_bits(),
            BranchPredictor::Tournament => self.tournament.storage_bits(),
            BranchPredictor::Custom => self.custom.storage_bits(),
        }
    }

    /// Validates the active variant's widths and checks them against the budget.
    ///
    /// Returns the storage the variant will allocate.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        match self.predictor {
            BranchPredictor::Static => {}
            BranchPredictor::GShare => self.gshare.validate()?,
            BranchPredictor::Tournament => self.tournament.validate()?,
            BranchPredictor::Custom => self.custom.validate()?,
        }

        let required = self.storage_bits();
        if required > self.budget_bits {
            return Err(ConfigError::BudgetExceeded {
                required,
                budget: self.budget_bits,
            });
        }
        Ok(required)
    }

    /// Applies a compact selector such as `gshare:13` or `tournament:12:10:10`.
    ///
    /// Accepted forms:
    /// - `static`
    /// - `gshare` or `gshare:<ghist>`
    /// - `tournament` or `tournament:<ghist>:<lhist>:<pcindex>`
    /// - `custom` or `custom:<history>:<table_bits>`
    ///
    /// Widths given here override the loaded configuration. The tournament's
    /// choice table follows the global history width.
    pub fn apply_selector(&mut self, selector: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidSelector(selector.to_string());
        let mut parts = selector.trim().split(':');
        let name = parts.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let args = parts
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match (name.as_str(), args.as_slice()) {
            ("static", []) => self.predictor = BranchPredictor::Static,
            ("gshare", []) => self.predictor = BranchPredictor::GShare,
            ("gshare", &[ghist]) => {
                self.predictor = BranchPredictor::GShare;
                self.gshare.history_bits = ghist;
            }
            ("tournament", []) => self.predictor = BranchPredictor::Tournament,
            ("tournament", &[ghist, lhist, pc_index]) => {
                self.predictor = BranchPredictor::Tournament;
                let t = &mut self.tournament;
                t.global_history_bits = ghist;
                t.choice_bits = ghist;
                t.local_history_bits = lhist;
                t.pc_index_bits = pc_index;
                if t.choice_index == ChoiceIndex::PathHistory {
                    t.path_history_bits = ghist;
                }
            }
            ("custom", []) => self.predictor = BranchPredictor::Custom,
            ("custom", &[history, table_bits]) => {
                self.predictor = BranchPredictor::Custom;
                self.custom.history_length = history;
                self.custom.table_bits = table_bits;
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            predictor: BranchPredictor::default(),
            budget_bits: defaults::BUDGET_BITS,
            gshare: GShareConfig::default(),
            tournament: TournamentConfig::default(),
            custom: PerceptronConfig::default(),
        }
    }
}

impl FromStr for PredictorConfig {
    type Err = ConfigError;

    /// Builds a default configuration and applies the selector to it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Self::default();
        config.apply_selector(s)?;
        Ok(config)
    }
}

/// Gshare predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GShareConfig {
    /// Global history width; the table has `2^history_bits` counters
    #[serde(default = "GShareConfig::default_history")]
    pub history_bits: usize,
}

impl GShareConfig {
    /// Returns the default gshare history width.
    const fn default_history() -> usize {
        defaults::GSHARE_HISTORY_BITS
    }

    /// Table counters plus the global history register.
    pub fn storage_bits(&self) -> usize {
        table_bits(self.history_bits).saturating_add(self.history_bits)
    }

    /// Checks the history width against the table bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_width("gshare.history_bits", self.history_bits, MAX_TABLE_BITS)
    }
}

impl Default for GShareConfig {
    fn default() -> Self {
        Self {
            history_bits: defaults::GSHARE_HISTORY_BITS,
        }
    }
}

/// Tournament predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentConfig {
    /// Global history width (global table has `2^global_history_bits` counters)
    #[serde(default = "TournamentConfig::default_global")]
    pub global_history_bits: usize,

    /// Local history width (local table has `2^local_history_bits` counters)
    #[serde(default = "TournamentConfig::default_local")]
    pub local_history_bits: usize,

    /// PC bits selecting a local history entry
    #[serde(default = "TournamentConfig::default_pc_index")]
    pub pc_index_bits: usize,

    /// Choice table index width
    #[serde(default = "TournamentConfig::default_choice")]
    pub choice_bits: usize,

    /// Path history register width
    #[serde(default = "TournamentConfig::default_path")]
    pub path_history_bits: usize,

    /// Register driving the choice table
    #[serde(default)]
    pub choice_index: ChoiceIndex,
}

impl TournamentConfig {
    /// Returns the default tournament global history width.
    const fn default_global() -> usize {
        defaults::TOURNAMENT_GLOBAL_HISTORY_BITS
    }

    /// Returns the default tournament local history width.
    const fn default_local() -> usize {
        defaults::TOURNAMENT_LOCAL_HISTORY_BITS
    }

    /// Returns the default tournament PC index width.
    const fn default_pc_index() -> usize {
        defaults::TOURNAMENT_PC_INDEX_BITS
    }

    /// Returns the default tournament choice table width.
    const fn default_choice() -> usize {
        defaults::TOURNAMENT_CHOICE_BITS
    }

    /// Returns the default tournament path history width.
    const fn default_path() -> usize {
        defaults::TOURNAMENT_PATH_HISTORY_BITS
    }

    /// Local history table, three counter tables, and both history registers.
    pub fn storage_bits(&self) -> usize {
        let lht = entries(self.pc_index_bits).saturating_mul(self.local_history_bits);
        let tables = table_bits(self.local_history_bits)
            .saturating_add(table_bits(self.global_history_bits))
            .saturating_add(table_bits(self.choice_bits));
        lht.saturating_add(tables)
            .saturating_add(self.global_history_bits)
            .saturating_add(self.path_history_bits)
    }

    /// Checks width bounds and choice/global/path consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_width(
            "tournament.global_history_bits",
            self.global_history_bits,
            MAX_TABLE_BITS,
        )?;
        check_width(
            "tournament.local_history_bits",
            self.local_history_bits,
            MAX_TABLE_BITS,
        )?;
        check_width("tournament.pc_index_bits", self.pc_index_bits, MAX_TABLE_BITS)?;
        check_width("tournament.choice_bits", self.choice_bits, MAX_TABLE_BITS)?;
        check_width(
            "tournament.path_history_bits",
            self.path_history_bits,
            MAX_HISTORY_BITS,
        )?;

        if self.choice_bits != self.global_history_bits {
            return Err(ConfigError::MismatchedWidths {
                choice: self.choice_bits,
                global: self.global_history_bits,
            });
        }
        if self.choice_index == ChoiceIndex::PathHistory
            && self.path_history_bits != self.choice_bits
        {
            return Err(ConfigError::PathWidthMismatch {
                choice: self.choice_bits,
                path: self.path_history_bits,
            });
        }
        Ok(())
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            global_history_bits: defaults::TOURNAMENT_GLOBAL_HISTORY_BITS,
            local_history_bits: defaults::TOURNAMENT_LOCAL_HISTORY_BITS,
            pc_index_bits: defaults::TOURNAMENT_PC_INDEX_BITS,
            choice_bits: defaults::TOURNAMENT_CHOICE_BITS,
            path_history_bits: defaults::TOURNAMENT_PATH_HISTORY_BITS,
            choice_index: ChoiceIndex::default(),
        }
    }
}

/// Perceptron (custom slot) predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PerceptronConfig {
    /// Global history length (weights per row, excluding bias)
    #[serde(default = "PerceptronConfig::default_history")]
    pub history_length: usize,

    /// Log2 of perceptron table size
    #[serde(default = "PerceptronConfig::default_table_bits")]
    pub table_bits: usize,
}

impl PerceptronConfig {
    /// Returns the default perceptron global history length.
    const fn default_history() -> usize {
        defaults::PERCEPTRON_HISTORY
    }

    /// Returns the default perceptron table size (log2).
    const fn default_table_bits() -> usize {
        defaults::PERCEPTRON_TABLE_BITS
    }

    /// Weight rows (bias plus one weight per history bit) and the history register.
    pub fn storage_bits(&self) -> usize {
        entries(self.table_bits)
            .saturating_mul(self.history_length.saturating_add(1))
            .saturating_mul(PERCEPTRON_WEIGHT_BITS)
            .saturating_add(self.history_length)
    }

    /// Checks the history length and table width bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_width(
            "custom.history_length",
            self.history_length,
            MAX_PERCEPTRON_HISTORY,
        )?;
        check_width("custom.table_bits", self.table_bits, MAX_TABLE_BITS)
    }
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            history_length: defaults::PERCEPTRON_HISTORY,
            table_bits: defaults::PERCEPTRON_TABLE_BITS,
        }
    }
}

/// Number of entries in a table indexed by `bits` bits, saturating on absurd widths.
fn entries(bits: usize) -> usize {
    u32::try_from(bits)
        .ok()
        .and_then(|b| 1usize.checked_shl(b))
        .unwrap_or(usize::MAX)
}

/// Storage of a counter table indexed by `bits` bits.
fn table_bits(bits: usize) -> usize {
    entries(bits).saturating_mul(SaturatingCounter::STORAGE_BITS)
}

/// Rejects zero widths and widths above `max`.
fn check_width(field: &'static str, bits: usize, max: usize) -> Result<(), ConfigError> {
    if bits == 0 || bits > max {
        return Err(ConfigError::InvalidWidth { field, bits, max });
    }
    Ok(())
}
