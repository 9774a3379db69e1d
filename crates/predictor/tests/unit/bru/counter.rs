//! Saturating Counter Tests.
//!
//! Verifies the 2-bit encoding, the predicted direction of each state, and
//! that updates move one step toward the outcome and clamp at both ends.

use bpsim_core::bru::counter::SaturatingCounter;
use proptest::prelude::*;
use rstest::rstest;

use SaturatingCounter::{StronglyNotTaken, StronglyTaken, WeaklyNotTaken, WeaklyTaken};

// ══════════════════════════════════════════════════════════
// 1. Encoding
// ══════════════════════════════════════════════════════════

/// Reset state is weakly not-taken (encoding 1).
#[test]
fn default_is_weakly_not_taken() {
    assert_eq!(SaturatingCounter::default(), WeaklyNotTaken);
    assert_eq!(SaturatingCounter::default().bits(), 1);
}

/// Every legal encoding decodes to the matching state and back.
#[rstest]
#[case(0, StronglyNotTaken, false, "SN")]
#[case(1, WeaklyNotTaken, false, "WN")]
#[case(2, WeaklyTaken, true, "WT")]
#[case(3, StronglyTaken, true, "ST")]
fn encoding_and_direction(
    #[case] bits: u8,
    #[case] state: SaturatingCounter,
    #[case] taken: bool,
    #[case] label: &str,
) {
    assert_eq!(SaturatingCounter::from_bits(bits), Some(state));
    assert_eq!(state.bits(), bits);
    assert_eq!(state.predict(), taken);
    assert_eq!(state.to_string(), label);
}

/// Values outside 0..=3 are not counter states.
#[test]
fn illegal_encodings_rejected() {
    for bits in 4..=u8::MAX {
        assert_eq!(SaturatingCounter::from_bits(bits), None, "bits={bits}");
    }
}

// ══════════════════════════════════════════════════════════
// 2. Transitions
// ══════════════════════════════════════════════════════════

/// Full transition table.
#[rstest]
#[case(StronglyNotTaken, true, WeaklyNotTaken)]
#[case(StronglyNotTaken, false, StronglyNotTaken)]
#[case(WeaklyNotTaken, true, WeaklyTaken)]
#[case(WeaklyNotTaken, false, StronglyNotTaken)]
#[case(WeaklyTaken, true, StronglyTaken)]
#[case(WeaklyTaken, false, WeaklyNotTaken)]
#[case(StronglyTaken, true, StronglyTaken)]
#[case(StronglyTaken, false, WeaklyTaken)]
fn transition(
    #[case] from: SaturatingCounter,
    #[case] taken: bool,
    #[case] to: SaturatingCounter,
) {
    assert_eq!(from.update(taken), to);
}

/// From the reset state, a single taken outcome flips the prediction.
#[test]
fn one_taken_flips_reset_state() {
    let ctr = SaturatingCounter::default();
    assert!(!ctr.predict());
    assert!(ctr.update(true).predict());
}

proptest! {
    /// Any outcome sequence keeps the counter legal, and each step changes
    /// the encoding by at most one.
    #[test]
    fn updates_stay_in_range(start in 0u8..4, outcomes in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut ctr = SaturatingCounter::from_bits(start).unwrap();
        for taken in outcomes {
            let next = ctr.update(taken);
            prop_assert!(next.bits() <= 3);
            prop_assert!(next.bits().abs_diff(ctr.bits()) <= 1);
            if taken {
                prop_assert!(next >= ctr);
            } else {
                prop_assert!(next <= ctr);
            }
            ctr = next;
        }
    }

    /// Three identical outcomes saturate the counter from any state.
    #[test]
    fn three_outcomes_saturate(start in 0u8..4, taken in any::<bool>()) {
        let ctr = SaturatingCounter::from_bits(start)
            .unwrap()
            .update(taken)
            .update(taken)
            .update(taken);
        let expected = if taken { StronglyTaken } else { StronglyNotTaken };
        prop_assert_eq!(ctr, expected);
    }
}
