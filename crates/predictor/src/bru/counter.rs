//! Two-bit saturating counter.
//!
//! The unit of confidence kept in every prediction table entry. Four states,
//! totally ordered from strongly not-taken to strongly taken; an update moves
//! one step toward the observed outcome and clamps at either end.

use std::fmt;

/// Four-state saturating counter.
///
/// The discriminants are the 2-bit encodings stored in prediction tables.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SaturatingCounter {
    /// Strongly not-taken (0b00).
    StronglyNotTaken = 0,
    /// Weakly not-taken (0b01); the reset state of every table entry.
    #[default]
    WeaklyNotTaken = 1,
    /// Weakly taken (0b10).
    WeaklyTaken = 2,
    /// Strongly taken (0b11).
    StronglyTaken = 3,
}

impl SaturatingCounter {
    /// Storage cost of one counter in bits.
    pub const STORAGE_BITS: usize = 2;

    /// Decodes a stored 2-bit value, or `None` if it is not a legal state.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::StronglyNotTaken),
            1 => Some(Self::WeaklyNotTaken),
            2 => Some(Self::WeaklyTaken),
            3 => Some(Self::StronglyTaken),
            _ => None,
        }
    }

    /// Returns the stored 2-bit encoding.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Predicts taken for the two upper states.
    #[inline]
    pub const fn predict(self) -> bool {
        matches!(self, Self::WeaklyTaken | Self::StronglyTaken)
    }

    /// Moves one step toward the outcome, saturating at the ends.
    #[inline]
    #[must_use]
    pub const fn update(self, taken: bool) -> Self {
        match (self, taken) {
            (Self::StronglyNotTaken, false) | (Self::WeaklyNotTaken, false) => {
                Self::StronglyNotTaken
            }
            (Self::StronglyNotTaken, true) => Self::WeaklyNotTaken,
            (Self::WeaklyNotTaken, true) | (Self::StronglyTaken, false) => Self::WeaklyTaken,
            (Self::WeaklyTaken, false) => Self::WeaklyNotTaken,
            (Self::WeaklyTaken, true) | (Self::StronglyTaken, true) => Self::StronglyTaken,
        }
    }
}

impl fmt::Display for SaturatingCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StronglyNotTaken => "SN",
            Self::WeaklyNotTaken => "WN",
            Self::WeaklyTaken => "WT",
            Self::StronglyTaken => "ST",
        };
        f.write_str(s)
    }
}
