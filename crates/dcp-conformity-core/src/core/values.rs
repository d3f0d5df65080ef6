// crates/dcp-conformity-core/src/core/values.rs
// ============================================================================
// Module: Parameter Values
// Description: Measured/expected value representation and decimal helpers.
// Purpose: Keep numeric comparison decimal-exact and display formatting uniform.
// Dependencies: bigdecimal, serde
// ============================================================================

//! ## Overview
//! Values cross the engine boundary as JSON numbers or booleans. Internally,
//! numbers are compared as `BigDecimal` parsed from their shortest round-trip
//! rendering so that a measurement written as `5.1` sits exactly on a `5 ± 2%`
//! band edge instead of drifting by one ulp.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Parameter Value
// ============================================================================

/// A numeric or boolean parameter value as exchanged with callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Boolean capability (e.g. bus yield).
    Boolean(bool),
    /// Numeric measurement in the parameter's unit.
    Number(f64),
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => f.write_str(yes_no(*value)),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

// ============================================================================
// SECTION: Formatting
// ============================================================================

/// Renders a boolean the way the report displays it.
#[must_use]
pub const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Joins a rendered number with its unit, omitting the unit when absent.
#[must_use]
pub fn with_unit(number: &str, unit: Option<&str>) -> String {
    match unit {
        Some(unit) if !unit.is_empty() => format!("{number} {unit}"),
        _ => number.to_string(),
    }
}

/// Renders a decimal using the shortest float form (`5.0` renders as `5`).
#[must_use]
pub fn format_decimal(value: &BigDecimal) -> String {
    decimal_to_f64(value).to_string()
}

// ============================================================================
// SECTION: Decimal Conversion
// ============================================================================

/// Parses a float into `BigDecimal` through its shortest round-trip rendering.
///
/// Returns `None` for NaN and infinities.
#[must_use]
pub fn decimal_from_f64(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&value.to_string()).ok()
}

/// Converts a decimal to the nearest float.
#[must_use]
pub fn decimal_to_f64(value: &BigDecimal) -> f64 {
    value.to_string().parse::<f64>().unwrap_or(f64::NAN)
}
