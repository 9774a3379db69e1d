//! Pattern history table of saturating counters.
//!
//! Entries are kept as raw 2-bit encodings so that a corrupted entry is
//! representable. Reading one logs a warning and degrades to not-taken rather
//! than aborting the run.

use tracing::warn;

use super::counter::SaturatingCounter;

/// Dense table of `2^index_bits` saturating counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionTable {
    /// Table name used in diagnostics.
    name: &'static str,
    /// Raw counter encodings.
    counters: Vec<u8>,
    /// Mask applied to every index.
    mask: usize,
}

impl PredictionTable {
    /// Creates a table with every counter at weakly not-taken.
    pub fn new(name: &'static str, index_bits: usize) -> Self {
        let size = 1usize << index_bits;
        Self {
            name,
            counters: vec![SaturatingCounter::default().bits(); size],
            mask: size - 1,
        }
    }

    /// Decoded counter at `index`, or `None` if the entry holds an illegal value.
    #[inline]
    pub fn counter(&self, index: usize) -> Option<SaturatingCounter> {
        SaturatingCounter::from_bits(self.counters[index & self.mask])
    }

    /// Prediction of the counter at `index`.
    #[inline]
    pub fn predict(&self, index: usize) -> bool {
        let index = index & self.mask;
        let raw = self.counters[index];
        SaturatingCounter::from_bits(raw).map_or_else(
            || {
                warn!(table = self.name, index, raw, "undefined counter state, predicting not-taken");
                false
            },
            SaturatingCounter::predict,
        )
    }

    /// Moves the counter at `index` one step toward `taken`.
    ///
    /// An entry holding an illegal value is left untouched.
    #[inline]
    pub fn update(&mut self, index: usize, taken: bool) {
        let index = index & self.mask;
        let raw = self.counters[index];
        match SaturatingCounter::from_bits(raw) {
            Some(ctr) => self.counters[index] = ctr.update(taken).bits(),
            None => warn!(table = self.name, index, raw, "undefined counter state, entry not updated"),
        }
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Always false; a table has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Storage cost in bits.
    pub fn storage_bits(&self) -> usize {
        self.counters.len() * SaturatingCounter::STORAGE_BITS
    }

    /// Overwrites an entry with an arbitrary raw value.
    #[cfg(test)]
    pub(crate) fn set_raw(&mut self, index: usize, raw: u8) {
        self.counters[index & self.mask] = raw;
    }
}
