// crates/dcp-conformity-core/src/core/tier.rs
// ============================================================================
// Module: Speed Tier Table
// Description: Governed DCP bus speeds, their timing deltas, and the schema.
// Purpose: Provide the static lookup every expectation is derived from.
// Dependencies: bigdecimal, serde, crate::core::{error, schema}
// ============================================================================

//! ## Overview
//! The DCP bus runs at one of four nominal speeds. Each speed has a single
//! timing unit (delta, in microseconds); every timing expectation is a multiple
//! of that delta. Deltas shrink strictly as speed grows.
//!
//! ## Invariants
//! - The tier set is closed: 4, 20, 32 and 64 MHz.
//! - Exactly one delta per tier, strictly decreasing in tier order.
//! - The table is immutable once built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;

use crate::core::error::ConformityError;
use crate::core::schema::ParameterDefinition;
use crate::core::schema::ParameterSchema;

// ============================================================================
// SECTION: Speed Tier
// ============================================================================

/// Nominal DCP bus speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SpeedTier {
    /// 4 MHz bus.
    Mhz4,
    /// 20 MHz bus.
    Mhz20,
    /// 32 MHz bus.
    Mhz32,
    /// 64 MHz bus.
    Mhz64,
}

impl SpeedTier {
    /// Every governed tier in ascending speed order.
    pub const ALL: [Self; 4] = [Self::Mhz4, Self::Mhz20, Self::Mhz32, Self::Mhz64];

    /// Resolves a nominal speed in MHz to its tier.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::UnknownTier`] for speeds outside the governed set.
    pub const fn from_nominal_mhz(nominal_mhz: u32) -> Result<Self, ConformityError> {
        match nominal_mhz {
            4 => Ok(Self::Mhz4),
            20 => Ok(Self::Mhz20),
            32 => Ok(Self::Mhz32),
            64 => Ok(Self::Mhz64),
            _ => Err(ConformityError::UnknownTier {
                nominal_mhz,
            }),
        }
    }

    /// Returns the nominal speed in MHz.
    #[must_use]
    pub const fn nominal_mhz(self) -> u32 {
        match self {
            Self::Mhz4 => 4,
            Self::Mhz20 => 20,
            Self::Mhz32 => 32,
            Self::Mhz64 => 64,
        }
    }

    /// Position of the tier in [`SpeedTier::ALL`].
    const fn index(self) -> usize {
        match self {
            Self::Mhz4 => 0,
            Self::Mhz20 => 1,
            Self::Mhz32 => 2,
            Self::Mhz64 => 3,
        }
    }
}

impl TryFrom<u32> for SpeedTier {
    type Error = ConformityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_nominal_mhz(value)
    }
}

impl From<SpeedTier> for u32 {
    fn from(value: SpeedTier) -> Self {
        value.nominal_mhz()
    }
}

impl fmt::Display for SpeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz", self.nominal_mhz())
    }
}

// ============================================================================
// SECTION: Delta Table
// ============================================================================

/// Delta per tier in microseconds, as `(unscaled digits, scale)`.
const STANDARD_DELTAS: [(i64, i64); 4] = [(20, 0), (4, 0), (25, 1), (125, 2)];

/// Static mapping from speed tier to delta plus the parameter schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedTierTable {
    /// Delta per tier, indexed by [`SpeedTier::index`].
    deltas: [BigDecimal; 4],
    /// Ordered parameter definitions shared by every tier.
    schema: ParameterSchema,
}

impl SpeedTierTable {
    /// Builds the governed table with the standard parameter schema.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_schema(ParameterSchema::standard())
    }

    /// Builds the governed delta table around a caller-provided schema.
    #[must_use]
    pub fn with_schema(schema: ParameterSchema) -> Self {
        let deltas = STANDARD_DELTAS.map(|(digits, scale)| BigDecimal::new(digits.into(), scale));
        Self {
            deltas,
            schema,
        }
    }

    /// Returns the delta (µs) for a tier.
    #[must_use]
    pub fn delta(&self, tier: SpeedTier) -> &BigDecimal {
        &self.deltas[tier.index()]
    }

    /// Returns the delta (µs) for a nominal speed.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::UnknownTier`] for speeds outside the governed set.
    pub fn delta_for(&self, nominal_mhz: u32) -> Result<&BigDecimal, ConformityError> {
        let tier = SpeedTier::from_nominal_mhz(nominal_mhz)?;
        Ok(self.delta(tier))
    }

    /// Returns the ordered parameter definitions; identical for every tier.
    #[must_use]
    pub fn parameter_definitions(&self) -> &[ParameterDefinition] {
        self.schema.definitions()
    }

    /// Returns the parameter schema.
    #[must_use]
    pub const fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// Returns `(tier, delta)` pairs in ascending speed order.
    pub fn entries(&self) -> impl Iterator<Item = (SpeedTier, &BigDecimal)> {
        SpeedTier::ALL.into_iter().map(|tier| (tier, self.delta(tier)))
    }
}

impl Default for SpeedTierTable {
    fn default() -> Self {
        Self::standard()
    }
}
