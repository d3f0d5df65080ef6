// crates/dcp-conformity-core/src/core/schema.rs
// ============================================================================
// Module: Parameter Schema
// Description: Governed DCP parameter definitions and their expectation basis.
// Purpose: Single source of truth for which parameters are evaluated and how.
// Dependencies: bigdecimal, serde, crate::core::error
// ============================================================================

//! ## Overview
//! The schema is an ordered list of parameter definitions. Order drives report
//! layout only; evaluation of each parameter is independent. Measurements are
//! joined to the schema by name, never the other way around.
//!
//! ## Invariants
//! - Names are unique.
//! - Numeric parameters always carry a unit; boolean parameters never do.
//! - Multipliers are strictly positive.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use bigdecimal::BigDecimal;
use bigdecimal::Zero;
use serde::Deserialize;
use serde::Serialize;

use crate::core::error::ConformityError;

// ============================================================================
// SECTION: Names and Units
// ============================================================================

/// Display names of the governed parameters.
pub mod parameter_names {
    /// Bus frequency.
    pub const SPEED: &str = "Speed";
    /// High period of a `1` bit.
    pub const BIT_HIGH_TIME: &str = "Bit High Time";
    /// Low period of a bit.
    pub const BIT_LOW_TIME: &str = "Bit Low Time";
    /// Sync burst low period.
    pub const SYNC_TIME: &str = "Sync Time";
    /// Full bit-sync period.
    pub const BIT_SYNC_TIME: &str = "Bit Sync Time";
    /// High half of bit-sync.
    pub const BIT_SYNC_HIGH: &str = "Bit Sync High";
    /// Low half of bit-sync.
    pub const BIT_SYNC_LOW: &str = "Bit Sync Low";
    /// Whether the device yields the bus on collision.
    pub const BUS_YIELD: &str = "Bus Yield";
}

/// Unit string for the frequency parameter.
pub const UNIT_MEGAHERTZ: &str = "MHz";
/// Unit string for timing parameters.
pub const UNIT_MICROSECONDS: &str = "µs";

// ============================================================================
// SECTION: Parameter Definition
// ============================================================================

/// Comparison family of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Numeric value with a unit, compared within a tolerance band.
    NumericWithUnit,
    /// Boolean value, compared exactly.
    Boolean,
}

/// How the expected value of a parameter is obtained for a tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectationBasis {
    /// `multiplier × delta(tier)`.
    DeltaMultiple(BigDecimal),
    /// The tier's nominal frequency.
    NominalSpeed,
    /// A fixed boolean requirement.
    Literal(bool),
}

/// One governed parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDefinition {
    /// Unique display name.
    name: String,
    /// Unit string for numeric parameters.
    unit: Option<String>,
    /// Expectation basis.
    basis: ExpectationBasis,
}

impl ParameterDefinition {
    /// Defines a timing parameter expected at `multiplier × delta`.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::InvalidMultiplier`] when `multiplier <= 0`.
    pub fn delta_multiple(
        name: impl Into<String>,
        unit: impl Into<String>,
        multiplier: BigDecimal,
    ) -> Result<Self, ConformityError> {
        let name = name.into();
        check_multiplier(&name, &multiplier)?;
        Ok(Self {
            name,
            unit: Some(unit.into()),
            basis: ExpectationBasis::DeltaMultiple(multiplier),
        })
    }

    /// Defines the frequency parameter expected at the tier's nominal speed.
    #[must_use]
    pub fn nominal_speed(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: Some(unit.into()),
            basis: ExpectationBasis::NominalSpeed,
        }
    }

    /// Defines a boolean requirement with a fixed expected literal.
    #[must_use]
    pub fn boolean(name: impl Into<String>, expected: bool) -> Self {
        Self {
            name: name.into(),
            unit: None,
            basis: ExpectationBasis::Literal(expected),
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the comparison family.
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        match self.basis {
            ExpectationBasis::Literal(_) => ParameterKind::Boolean,
            ExpectationBasis::DeltaMultiple(_) | ExpectationBasis::NominalSpeed => {
                ParameterKind::NumericWithUnit
            }
        }
    }

    /// Returns the unit, present iff the parameter is numeric.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Returns the expectation basis.
    #[must_use]
    pub const fn basis(&self) -> &ExpectationBasis {
        &self.basis
    }

    /// Returns the delta multiplier for delta-scaled parameters.
    #[must_use]
    pub const fn multiplier(&self) -> Option<&BigDecimal> {
        match &self.basis {
            ExpectationBasis::DeltaMultiple(multiplier) => Some(multiplier),
            ExpectationBasis::NominalSpeed | ExpectationBasis::Literal(_) => None,
        }
    }
}

/// Rejects zero and negative multipliers.
fn check_multiplier(name: &str, multiplier: &BigDecimal) -> Result<(), ConformityError> {
    if multiplier.is_zero() || multiplier < &BigDecimal::zero() {
        return Err(ConformityError::InvalidMultiplier {
            parameter: name.to_string(),
            reason: "multiplier must be greater than zero".to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Parameter Schema
// ============================================================================

/// Multipliers of the delta-scaled timing parameters, as `(name, digits, scale)`.
const STANDARD_TIMINGS: [(&str, i64, i64); 6] = [
    (parameter_names::BIT_HIGH_TIME, 2, 0),
    (parameter_names::BIT_LOW_TIME, 1, 0),
    (parameter_names::SYNC_TIME, 25, 0),
    (parameter_names::BIT_SYNC_TIME, 15, 0),
    (parameter_names::BIT_SYNC_HIGH, 75, 1),
    (parameter_names::BIT_SYNC_LOW, 75, 1),
];

/// Ordered, name-unique set of parameter definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSchema {
    /// Definitions in report order.
    definitions: Vec<ParameterDefinition>,
}

impl ParameterSchema {
    /// Builds a schema from definitions in report order.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::DuplicateParameter`] when two definitions share a name.
    pub fn new(definitions: Vec<ParameterDefinition>) -> Result<Self, ConformityError> {
        let mut seen = BTreeSet::new();
        for definition in &definitions {
            if !seen.insert(definition.name()) {
                return Err(ConformityError::DuplicateParameter(definition.name().to_string()));
            }
        }
        Ok(Self {
            definitions,
        })
    }

    /// Returns the governed eight-parameter DCP schema.
    #[must_use]
    pub fn standard() -> Self {
        let mut definitions = Vec::with_capacity(STANDARD_TIMINGS.len() + 2);
        definitions.push(ParameterDefinition::nominal_speed(parameter_names::SPEED, UNIT_MEGAHERTZ));
        for (name, digits, scale) in STANDARD_TIMINGS {
            definitions.push(ParameterDefinition {
                name: name.to_string(),
                unit: Some(UNIT_MICROSECONDS.to_string()),
                basis: ExpectationBasis::DeltaMultiple(BigDecimal::new(digits.into(), scale)),
            });
        }
        definitions.push(ParameterDefinition::boolean(parameter_names::BUS_YIELD, true));
        Self {
            definitions,
        }
    }

    /// Returns a copy with one delta multiplier replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::UnknownParameter`] when `name` is not in the
    /// schema and [`ConformityError::InvalidMultiplier`] when the parameter is
    /// not delta-scaled or the multiplier is not positive.
    pub fn with_multiplier(
        mut self,
        name: &str,
        multiplier: BigDecimal,
    ) -> Result<Self, ConformityError> {
        let definition = self
            .definitions
            .iter_mut()
            .find(|definition| definition.name == name)
            .ok_or_else(|| ConformityError::UnknownParameter(name.to_string()))?;
        if definition.multiplier().is_none() {
            return Err(ConformityError::InvalidMultiplier {
                parameter: name.to_string(),
                reason: "parameter is not derived from the tier delta".to_string(),
            });
        }
        check_multiplier(name, &multiplier)?;
        definition.basis = ExpectationBasis::DeltaMultiple(multiplier);
        Ok(self)
    }

    /// Returns the definitions in report order.
    #[must_use]
    pub fn definitions(&self) -> &[ParameterDefinition] {
        &self.definitions
    }

    /// Looks up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.definitions.iter().find(|definition| definition.name == name)
    }

    /// Returns true when `name` is governed by the schema.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of definitions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true when the schema has no definitions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ParameterSchema {
    fn default() -> Self {
        Self::standard()
    }
}
