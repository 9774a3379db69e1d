//! Perceptron Branch Predictor (custom slot).
//!
//! Keeps one row of signed weights per table entry: a bias followed by one
//! weight per global history bit. The prediction is the sign of the bias plus
//! the history-signed weight sum, and a row is only trained on a
//! misprediction or when the sum is within the training threshold.

use tracing::trace;

use super::{BranchPredictor, history::HistoryRegister};
use crate::common::branch::BranchRecord;
use crate::config::{PERCEPTRON_WEIGHT_BITS, PerceptronConfig};

/// Threshold slope per history bit.
const THETA_COEFF: f64 = 1.93;
/// Threshold offset.
const THETA_BIAS: f64 = 14.0;

/// Perceptron predictor filling the custom slot.
#[derive(Debug, Clone)]
pub struct PerceptronPredictor {
    /// Global history; bit `i` pairs with weight `i + 1` of a row.
    ghr: HistoryRegister,
    /// Row-major weights, `rows * (history_length + 1)` entries.
    weights: Vec<i8>,
    /// Mask selecting a row from hashed PC and history bits.
    row_mask: usize,
    /// Weights per row, bias included.
    row_len: usize,
    /// Training threshold (theta).
    threshold: i32,
}

impl PerceptronPredictor {
    /// Creates a predictor with every weight at zero.
    ///
    /// The configuration must already be validated.
    pub fn new(config: &PerceptronConfig) -> Self {
        let rows = 1usize << config.table_bits;
        let row_len = config.history_length + 1;
        Self {
            ghr: HistoryRegister::new(config.history_length),
            weights: vec![0; rows * row_len],
            row_mask: rows - 1,
            row_len,
            threshold: THETA_COEFF.mul_add(config.history_length as f64, THETA_BIAS) as i32,
        }
    }

    /// Training threshold.
    pub const fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Row selected for `pc`: word address XOR history, masked to the table.
    #[inline]
    pub fn index(&self, pc: u64) -> usize {
        ((pc >> 2) as usize ^ self.ghr.value() as usize) & self.row_mask
    }

    /// Weights of one row; element 0 is the bias.
    #[inline]
    fn row(&self, index: usize) -> &[i8] {
        let start = index * self.row_len;
        &self.weights[start..start + self.row_len]
    }

    /// +1 for a taken history bit, -1 otherwise.
    #[inline]
    fn history_sign(history: u64, bit: usize) -> i32 {
        if (history >> bit) & 1 == 1 { 1 } else { -1 }
    }

    /// Bias plus the history-signed weight sum of row `index`.
    pub fn output(&self, index: usize) -> i32 {
        let history = self.ghr.value();
        let (bias, rest) = self.row(index).split_at(1);
        rest.iter().enumerate().fold(i32::from(bias[0]), |sum, (bit, &w)| {
            sum + Self::history_sign(history, bit) * i32::from(w)
        })
    }
}

/// Saturating weight update.
fn nudge(weight: i8, delta: i32) -> i8 {
    (i32::from(weight) + delta).clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8
}

impl BranchPredictor for PerceptronPredictor {
    /// Taken when the output is non-negative.
    #[inline]
    fn predict(&self, pc: u64) -> bool {
        self.output(self.index(pc)) >= 0
    }

    fn train(&mut self, record: &BranchRecord) {
        let index = self.index(record.pc);
        let y = self.output(index);
        let mispredicted = (y >= 0) != record.taken;

        if mispredicted || y.abs() <= self.threshold {
            let direction = if record.taken { 1 } else { -1 };
            let history = self.ghr.value();
            let start = index * self.row_len;
            let row = &mut self.weights[start..start + self.row_len];
            row[0] = nudge(row[0], direction);
            for (bit, w) in row[1..].iter_mut().enumerate() {
                *w = nudge(*w, direction * Self::history_sign(history, bit));
            }
        }

        self.ghr.shift_in(record.taken);
        trace!(pc = record.pc, index, y, taken = record.taken, "perceptron train");
    }

    fn storage_bits(&self) -> usize {
        self.weights.len() * PERCEPTRON_WEIGHT_BITS + self.ghr.storage_bits()
    }

    fn name(&self) -> &'static str {
        "Custom (perceptron)"
    }
}
