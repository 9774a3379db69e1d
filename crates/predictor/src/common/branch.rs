//! Branch event record.
//!
//! One resolved control-flow instruction as fed to the predictor: its address,
//! target, outcome, and the metadata a variant may condition its update on.

use std::fmt;

/// A single branch event in trace order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BranchRecord {
    /// Program counter of the branch instruction.
    pub pc: u64,
    /// Resolved target address.
    pub target: u64,
    /// Whether the branch was taken.
    pub taken: bool,
    /// Conditional branch (the only kind that is predicted and trained).
    pub conditional: bool,
    /// Procedure call.
    pub call: bool,
    /// Procedure return.
    pub ret: bool,
    /// Target encoded in the instruction (not register-indirect).
    pub direct: bool,
}

impl BranchRecord {
    /// A direct conditional branch with no recorded target.
    pub const fn conditional(pc: u64, taken: bool) -> Self {
        Self {
            pc,
            target: 0,
            taken,
            conditional: true,
            call: false,
            ret: false,
            direct: true,
        }
    }

    /// An unconditional jump, call, or return; always taken.
    pub const fn unconditional(pc: u64, target: u64, call: bool, ret: bool, direct: bool) -> Self {
        Self {
            pc,
            target,
            taken: true,
            conditional: false,
            call,
            ret,
            direct,
        }
    }

    /// Returns a copy with the target address set.
    #[must_use]
    pub const fn with_target(mut self, target: u64) -> Self {
        self.target = target;
        self
    }
}

impl fmt::Display for BranchRecord {
    /// Formats the record in the seven-field trace syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#x} {:#x} {} {} {} {} {}",
            self.pc,
            self.target,
            u8::from(self.taken),
            u8::from(self.conditional),
            u8::from(self.call),
            u8::from(self.ret),
            u8::from(self.direct)
        )
    }
}
