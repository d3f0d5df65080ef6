// crates/dcp-conformity-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Conformity Evaluator
// Description: Expected-versus-measured comparison for one parameter.
// Purpose: Convert a measurement into a tri-state verdict with a failure reason.
// Dependencies: bigdecimal, crate::core
// ============================================================================

//! ## Overview
//! Numeric parameters pass when the measurement lies in the closed band
//! `[e - t*|e|, e + t*|e|]`; boolean parameters pass on exact equality.
//! Missing evidence, evidence of the wrong kind, and non-finite numbers yield
//! `Unknown` with no reason. Arithmetic is decimal so band edges are exact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::One;
use bigdecimal::Zero;

use crate::core::ConformityError;
use crate::core::ConformityResult;
use crate::core::ParameterValue;
use crate::core::Verdict;
use crate::core::values::decimal_from_f64;
use crate::core::values::with_unit;
use crate::core::values::yes_no;
use crate::runtime::deriver::Expectation;
use crate::runtime::deriver::ExpectedValue;

// ============================================================================
// SECTION: Tolerance
// ============================================================================

/// Relative tolerance fraction applied to numeric expectations.
///
/// # Invariants
/// - `0 < fraction < 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tolerance {
    /// Band half-width as a fraction of `|expected|`.
    fraction: BigDecimal,
}

impl Tolerance {
    /// Builds a tolerance from a float fraction (`0.02` for ±2%).
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::InvalidTolerance`] when the fraction is not
    /// finite or outside `(0, 1)`.
    pub fn new(fraction: f64) -> Result<Self, ConformityError> {
        let decimal = decimal_from_f64(fraction)
            .ok_or_else(|| ConformityError::InvalidTolerance(fraction.to_string()))?;
        Self::from_decimal(decimal)
    }

    /// Builds a tolerance from a decimal fraction.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::InvalidTolerance`] when outside `(0, 1)`.
    pub fn from_decimal(fraction: BigDecimal) -> Result<Self, ConformityError> {
        if fraction <= BigDecimal::zero() || fraction >= BigDecimal::one() {
            return Err(ConformityError::InvalidTolerance(format!(
                "{fraction} is outside (0, 1)"
            )));
        }
        Ok(Self {
            fraction,
        })
    }

    /// Returns the fraction.
    #[must_use]
    pub const fn fraction(&self) -> &BigDecimal {
        &self.fraction
    }

    /// Returns the closed `(lower, upper)` band around `expected`.
    #[must_use]
    pub fn band(&self, expected: &BigDecimal) -> (BigDecimal, BigDecimal) {
        let margin = &self.fraction * expected.abs();
        (expected - &margin, expected + &margin)
    }

    /// Returns true when `measured` lies inside the closed band.
    #[must_use]
    pub fn contains(&self, expected: &BigDecimal, measured: &BigDecimal) -> bool {
        let (lower, upper) = self.band(expected);
        &lower <= measured && measured <= &upper
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            fraction: BigDecimal::new(2.into(), 2),
        }
    }
}

impl FromStr for Tolerance {
    type Err = ConformityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let fraction = BigDecimal::from_str(value)
            .map_err(|_| ConformityError::InvalidTolerance(value.to_string()))?;
        Self::from_decimal(fraction)
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates one expectation against an optional measurement.
#[must_use]
pub fn evaluate(
    expectation: &Expectation,
    measurement: Option<ParameterValue>,
    tolerance: &Tolerance,
) -> ConformityResult {
    let formatted_measured = measurement.map(|value| format_measured(expectation, value));
    let outcome = match (&expectation.expected_value, measurement) {
        (ExpectedValue::Number(expected), Some(ParameterValue::Number(measured))) => {
            decimal_from_f64(measured).map(|measured| tolerance.contains(expected, &measured))
        }
        (ExpectedValue::Boolean(expected), Some(ParameterValue::Boolean(measured))) => {
            Some(*expected == measured)
        }
        _ => None,
    };
    let verdict = outcome.map_or(Verdict::Unknown, Verdict::from);
    let reason = match (verdict, &expectation.expected_value, &formatted_measured) {
        (Verdict::Fail, ExpectedValue::Number(_), Some(measured)) => Some(format!(
            "{} out of tolerance: expected {}, measured {measured}",
            expectation.name(),
            expectation.formatted_expected
        )),
        (Verdict::Fail, ExpectedValue::Boolean(_), Some(measured)) => Some(format!(
            "{} failed: expected {}, measured {measured}",
            expectation.name(),
            expectation.formatted_expected
        )),
        _ => None,
    };
    ConformityResult {
        parameter: expectation.name().to_string(),
        expected: expectation.expected_value.to_parameter_value(),
        measured: measurement,
        formatted_expected: expectation.formatted_expected.clone(),
        formatted_measured,
        verdict,
        reason,
    }
}

/// Renders a measurement with the parameter's unit when numeric.
fn format_measured(expectation: &Expectation, value: ParameterValue) -> String {
    match value {
        ParameterValue::Number(number) => {
            with_unit(&number.to_string(), expectation.parameter.unit())
        }
        ParameterValue::Boolean(flag) => yes_no(flag).to_string(),
    }
}
