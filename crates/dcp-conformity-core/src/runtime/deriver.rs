// crates/dcp-conformity-core/src/runtime/deriver.rs
// ============================================================================
// Module: Expected Value Deriver
// Description: Per-tier expected values for every governed parameter.
// Purpose: Produce the ordered expectation list a report is evaluated against.
// Dependencies: bigdecimal, serde, crate::core
// ============================================================================

//! ## Overview
//! Expectations are derived fresh for each request and never mutated. Timing
//! expectations are exact decimal products of a multiplier and the tier delta;
//! the speed expectation is the tier's nominal frequency; boolean expectations
//! are fixed literals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeStruct;

use crate::core::ConformityError;
use crate::core::ExpectationBasis;
use crate::core::ParameterDefinition;
use crate::core::ParameterValue;
use crate::core::SpeedTier;
use crate::core::SpeedTierTable;
use crate::core::values::decimal_to_f64;
use crate::core::values::format_decimal;
use crate::core::values::with_unit;
use crate::core::values::yes_no;

// ============================================================================
// SECTION: Expectation
// ============================================================================

/// Expected value of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedValue {
    /// Exact decimal expectation in the parameter's unit.
    Number(BigDecimal),
    /// Required boolean.
    Boolean(bool),
}

impl ExpectedValue {
    /// Converts to the exchange representation.
    #[must_use]
    pub fn to_parameter_value(&self) -> ParameterValue {
        match self {
            Self::Number(value) => ParameterValue::Number(decimal_to_f64(value)),
            Self::Boolean(value) => ParameterValue::Boolean(*value),
        }
    }

    /// Returns the decimal payload, if any.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Self::Number(value) => Some(value),
            Self::Boolean(_) => None,
        }
    }
}

/// One derived expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// Governing parameter definition.
    pub parameter: ParameterDefinition,
    /// Expected value for the requested tier.
    pub expected_value: ExpectedValue,
    /// Expected value as displayed (`5 µs`, `32 MHz`, `Yes`).
    pub formatted_expected: String,
}

impl Expectation {
    /// Derives the expectation of `parameter` for `delta`/`tier`.
    fn derive(parameter: &ParameterDefinition, tier: SpeedTier, delta: &BigDecimal) -> Self {
        let expected_value = match parameter.basis() {
            ExpectationBasis::DeltaMultiple(multiplier) => ExpectedValue::Number(multiplier * delta),
            ExpectationBasis::NominalSpeed => {
                ExpectedValue::Number(BigDecimal::from(tier.nominal_mhz()))
            }
            ExpectationBasis::Literal(value) => ExpectedValue::Boolean(*value),
        };
        let formatted_expected = match &expected_value {
            ExpectedValue::Number(value) => with_unit(&format_decimal(value), parameter.unit()),
            ExpectedValue::Boolean(value) => yes_no(*value).to_string(),
        };
        Self {
            parameter: parameter.clone(),
            expected_value,
            formatted_expected,
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.parameter.name()
    }
}

impl Serialize for Expectation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Expectation", 5)?;
        state.serialize_field("parameter", self.parameter.name())?;
        state.serialize_field("kind", &self.parameter.kind())?;
        state.serialize_field("unit", &self.parameter.unit())?;
        state.serialize_field("expectedValue", &self.expected_value.to_parameter_value())?;
        state.serialize_field("formattedExpected", &self.formatted_expected)?;
        state.end()
    }
}

// ============================================================================
// SECTION: Derivation
// ============================================================================

/// Derives the ordered expectations for a known tier.
#[must_use]
pub fn derive_for_tier(table: &SpeedTierTable, tier: SpeedTier) -> Vec<Expectation> {
    let delta = table.delta(tier);
    table
        .parameter_definitions()
        .iter()
        .map(|parameter| Expectation::derive(parameter, tier, delta))
        .collect()
}

/// Derives the ordered expectations for a nominal speed in MHz.
///
/// # Errors
///
/// Returns [`ConformityError::UnknownTier`] when the speed is not governed.
pub fn derive_expectations(
    table: &SpeedTierTable,
    nominal_mhz: u32,
) -> Result<Vec<Expectation>, ConformityError> {
    let tier = SpeedTier::from_nominal_mhz(nominal_mhz)?;
    Ok(derive_for_tier(table, tier))
}
