//! Branch history registers.
//!
//! Fixed-width shift registers recording recent outcomes:
//! 1. **Global history:** One register shared by every trained branch.
//! 2. **Local history:** A PC-indexed table of per-branch registers.
//! 3. **Path history:** Same register shape, fed with address bits instead of outcomes.
//!
//! The newest bit always enters at bit 0 and the stored value is kept masked
//! to the configured width.

use std::fmt;

/// Returns a mask covering the low `width` bits.
#[inline]
const fn low_mask(width: usize) -> u64 {
    if width >= u64::BITS as usize {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Fixed-width history shift register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRegister {
    value: u64,
    width: usize,
    mask: u64,
}

impl HistoryRegister {
    /// Creates a cleared register of `width` bits (at most 64).
    pub const fn new(width: usize) -> Self {
        Self {
            value: 0,
            width,
            mask: low_mask(width),
        }
    }

    /// Shifts `bit` in as the newest entry, discarding the oldest.
    #[inline]
    pub const fn shift_in(&mut self, bit: bool) {
        self.value = ((self.value << 1) | bit as u64) & self.mask;
    }

    /// Current register contents.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Mask covering the configured width.
    pub const fn mask(&self) -> u64 {
        self.mask
    }

    /// Storage cost in bits.
    pub const fn storage_bits(&self) -> usize {
        self.width
    }
}

// Oldest bit on the left, newest on the right.
impl fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.width)
    }
}

/// PC-indexed table of local history registers.
///
/// The entry is chosen by the low `index_bits` of the PC, so distinct branches
/// that share those bits share (and interfere in) one history.
#[derive(Debug, Clone)]
pub struct LocalHistoryTable {
    histories: Vec<u64>,
    index_mask: u64,
    history_width: usize,
    history_mask: u64,
}

impl LocalHistoryTable {
    /// Creates a table of `2^index_bits` cleared histories of `history_width` bits.
    pub fn new(index_bits: usize, history_width: usize) -> Self {
        let entries = 1usize << index_bits;
        Self {
            histories: vec![0; entries],
            index_mask: low_mask(index_bits),
            history_width,
            history_mask: low_mask(history_width),
        }
    }

    /// Entry selected by `pc`.
    #[inline]
    pub const fn index(&self, pc: u64) -> usize {
        (pc & self.index_mask) as usize
    }

    /// Local history of the entry selected by `pc`.
    #[inline]
    pub fn history(&self, pc: u64) -> u64 {
        self.histories[self.index(pc)]
    }

    /// Shifts `taken` into the entry selected by `pc`.
    #[inline]
    pub fn shift_in(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        let h = &mut self.histories[idx];
        *h = ((*h << 1) | taken as u64) & self.history_mask;
    }

    /// Number of local history entries.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Always false; a table has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Width of each local history in bits.
    pub const fn history_width(&self) -> usize {
        self.history_width
    }

    /// Storage cost in bits.
    pub fn storage_bits(&self) -> usize {
        self.histories.len() * self.history_width
    }
}
