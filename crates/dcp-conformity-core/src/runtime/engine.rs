// crates/dcp-conformity-core/src/runtime/engine.rs
// ============================================================================
// Module: Conformity Engine
// Description: Configured facade over derivation, evaluation, and aggregation.
// Purpose: Configure once at start-up, then evaluate any number of runs.
// Dependencies: bigdecimal, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! [`ConformityEngine`] owns the read-only tier table and tolerance. It holds
//! no mutable state, so one instance can serve concurrent callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;

use crate::core::ConformityError;
use crate::core::ConformityReport;
use crate::core::ConformityResult;
use crate::core::MeasurementSet;
use crate::core::ParameterDefinition;
use crate::core::ParameterValue;
use crate::core::SpeedTierTable;
use crate::core::ValidationRecord;
use crate::runtime::aggregator;
use crate::runtime::deriver;
use crate::runtime::deriver::Expectation;
use crate::runtime::evaluator;
use crate::runtime::evaluator::Tolerance;

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Specification conformity engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConformityEngine {
    /// Tier deltas and parameter schema.
    table: SpeedTierTable,
    /// Numeric tolerance band.
    tolerance: Tolerance,
}

impl ConformityEngine {
    /// Creates an engine from a table and tolerance.
    #[must_use]
    pub const fn new(table: SpeedTierTable, tolerance: Tolerance) -> Self {
        Self {
            table,
            tolerance,
        }
    }

    /// Creates an engine with the standard schema and ±2% tolerance.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Returns the tier table.
    #[must_use]
    pub const fn table(&self) -> &SpeedTierTable {
        &self.table
    }

    /// Returns the tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Returns the delta for a nominal speed.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::UnknownTier`] when the speed is not governed.
    pub fn delta(&self, nominal_mhz: u32) -> Result<&BigDecimal, ConformityError> {
        self.table.delta_for(nominal_mhz)
    }

    /// Returns the ordered parameter definitions.
    #[must_use]
    pub fn parameter_definitions(&self) -> &[ParameterDefinition] {
        self.table.parameter_definitions()
    }

    /// Derives expectations for a nominal speed.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::UnknownTier`] when the speed is not governed.
    pub fn derive_expectations(&self, nominal_mhz: u32) -> Result<Vec<Expectation>, ConformityError> {
        deriver::derive_expectations(&self.table, nominal_mhz)
    }

    /// Evaluates one expectation.
    #[must_use]
    pub fn evaluate(
        &self,
        expectation: &Expectation,
        measurement: Option<ParameterValue>,
    ) -> ConformityResult {
        evaluator::evaluate(expectation, measurement, &self.tolerance)
    }

    /// Builds a report from measurements and upstream narratives.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::UnknownTier`] when the speed is not governed.
    pub fn build_report(
        &self,
        nominal_mhz: u32,
        measurements: &MeasurementSet,
        upstream: &[String],
    ) -> Result<ConformityReport, ConformityError> {
        aggregator::build_report(&self.table, &self.tolerance, nominal_mhz, measurements, upstream)
    }

    /// Builds a report from a full validation record.
    ///
    /// # Errors
    ///
    /// Returns [`ConformityError::UnknownTier`] when the speed is not governed.
    pub fn build_report_from_record(
        &self,
        nominal_mhz: u32,
        record: &ValidationRecord,
    ) -> Result<ConformityReport, ConformityError> {
        aggregator::build_report_from_record(&self.table, &self.tolerance, nominal_mhz, record)
    }
}
