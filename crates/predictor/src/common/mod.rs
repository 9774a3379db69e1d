//! Common types shared across the predictor, configuration, and trace layers.

/// Branch event record consumed by every predictor.
pub mod branch;

/// Configuration and trace error definitions.
pub mod error;

pub use self::branch::BranchRecord;
