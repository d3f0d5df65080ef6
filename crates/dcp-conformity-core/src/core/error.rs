// crates/dcp-conformity-core/src/core/error.rs
// ============================================================================
// Module: Conformity Errors
// Description: Structural error taxonomy for the conformity engine.
// Purpose: Surface caller mistakes as typed failures instead of silent defaults.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Only structural problems are errors. Per-parameter anomalies (missing or
//! out-of-tolerance measurements) are data and appear in the report instead.

use thiserror::Error;

/// Structural errors raised before any conformity result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConformityError {
    /// The requested speed is not one of the governed tiers.
    #[error("unsupported device speed: {nominal_mhz} MHz")]
    UnknownTier {
        /// Requested nominal speed in MHz.
        nominal_mhz: u32,
    },
    /// A schema override referenced a parameter outside the schema.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),
    /// Two parameter definitions share the same name.
    #[error("duplicate parameter: {0}")]
    DuplicateParameter(String),
    /// A multiplier override cannot be applied.
    #[error("invalid multiplier for {parameter}: {reason}")]
    InvalidMultiplier {
        /// Parameter the override targeted.
        parameter: String,
        /// Why the override was rejected.
        reason: String,
    },
    /// The tolerance fraction is outside `(0, 1)` or not finite.
    #[error("invalid tolerance: {0}")]
    InvalidTolerance(String),
}
