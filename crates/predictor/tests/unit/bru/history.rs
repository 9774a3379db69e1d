//! History Register Tests.

use bpsim_core::bru::history::{HistoryRegister, LocalHistoryTable};

/// New bits enter at bit 0 and the register stays masked to its width.
#[test]
fn shift_in_masks_to_width() {
    let mut ghr = HistoryRegister::new(3);
    for bit in [true, false, true, true] {
        ghr.shift_in(bit);
    }
    assert_eq!(ghr.value(), 0b011);
    assert_eq!(ghr.mask(), 0b111);
    assert_eq!(ghr.storage_bits(), 3);
}

/// Display shows the oldest bit first, padded to the width.
#[test]
fn display_is_padded_binary() {
    let mut ghr = HistoryRegister::new(5);
    ghr.shift_in(true);
    ghr.shift_in(false);
    assert_eq!(ghr.to_string(), "00010");
}

/// A 64-bit register keeps every bit.
#[test]
fn full_width_register() {
    let mut ghr = HistoryRegister::new(64);
    assert_eq!(ghr.mask(), u64::MAX);
    for _ in 0..64 {
        ghr.shift_in(true);
    }
    assert_eq!(ghr.value(), u64::MAX);
    ghr.shift_in(false);
    assert_eq!(ghr.value(), u64::MAX << 1);
}

/// Local histories are selected by the low PC bits and kept independent.
#[test]
fn local_histories_indexed_by_pc() {
    let mut lht = LocalHistoryTable::new(2, 4);
    assert_eq!(lht.len(), 4);
    assert_eq!(lht.storage_bits(), 16);

    lht.shift_in(0x1, true);
    lht.shift_in(0x1, true);
    lht.shift_in(0x2, true);

    assert_eq!(lht.history(0x1), 0b11);
    assert_eq!(lht.history(0x2), 0b1);
    assert_eq!(lht.history(0x0), 0);
    // 0x5 aliases onto entry 1.
    assert_eq!(lht.index(0x5), 1);
    assert_eq!(lht.history(0x5), 0b11);
}

/// Local histories are masked to their own width.
#[test]
fn local_history_masked() {
    let mut lht = LocalHistoryTable::new(1, 2);
    for _ in 0..5 {
        lht.shift_in(0, true);
    }
    assert_eq!(lht.history(0), 0b11);
    assert_eq!(lht.history_width(), 2);
}
