//! Branch prediction unit tests.

/// Two-bit saturating counter transitions.
pub mod counter;


/// Global and local history registers.
pub mod history;
