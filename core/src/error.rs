//! Invalid-argument failures raised by core constructors and mutators.

use thiserror::Error;

/// Arguments rejected before any state is touched.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimError {
    /// Damage amounts must be non-negative.
    #[error("damage must be non-negative, got {amount}")]
    NegativeDamage {
        /// Offending damage amount.
        amount: i32,
    },
    /// Grid dimensions fell outside the supported range.
    #[error("grid dimensions {width}x{height} must each lie within 2..={max}")]
    GridDimensions {
        /// Requested column count.
        width: u32,
        /// Requested row count.
        height: u32,
        /// Largest supported edge length.
        max: u32,
    },
    /// A grid without cells cannot be navigated.
    #[error("grid has zero area")]
    EmptyGrid,
    /// A configuration value is unusable.
    #[error("configuration value `{name}` is invalid: {reason}")]
    InvalidConfig {
        /// Name of the offending configuration entry.
        name: &'static str,
        /// Human readable explanation.
        reason: &'static str,
    },
}
