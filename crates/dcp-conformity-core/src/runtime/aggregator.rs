// crates/dcp-conformity-core/src/runtime/aggregator.rs
// ============================================================================
// Module: Report Aggregator
// Description: Whole-schema evaluation and failure narrative collection.
// Purpose: Build a complete conformity report or fail before producing any result.
// Dependencies: crate::core, crate::runtime::{deriver, evaluator}
// ============================================================================

//! ## Overview
//! The schema drives evaluation: every governed parameter yields exactly one
//! result, measurements outside the schema are listed as ignored, and each
//! parameter is judged independently of the others. Engine failure reasons
//! come first in schema order, followed by upstream narratives as given.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::ConformityError;
use crate::core::ConformityReport;
use crate::core::MeasurementSet;
use crate::core::SpeedTier;
use crate::core::SpeedTierTable;
use crate::core::ValidationRecord;
use crate::core::Verdict;
use crate::core::VerdictCounts;
use crate::runtime::deriver::derive_for_tier;
use crate::runtime::evaluator::Tolerance;
use crate::runtime::evaluator::evaluate;

// ============================================================================
// SECTION: Report Builders
// ============================================================================

/// Builds a conformity report for a nominal speed.
///
/// `upstream` carries failure narratives found outside per-parameter
/// comparison; pass an empty slice when there are none.
///
/// # Errors
///
/// Returns [`ConformityError::UnknownTier`] when the speed is not governed.
pub fn build_report(
    table: &SpeedTierTable,
    tolerance: &Tolerance,
    nominal_mhz: u32,
    measurements: &MeasurementSet,
    upstream: &[String],
) -> Result<ConformityReport, ConformityError> {
    let tier = SpeedTier::from_nominal_mhz(nominal_mhz)?;
    Ok(assemble(table, tolerance, tier, measurements, upstream))
}

/// Builds a conformity report from a full validation record.
///
/// Upstream narratives are the record's failure details followed by its
/// failed transmission checks. Electrical and transmission sections are
/// carried into the report unchanged.
///
/// # Errors
///
/// Returns [`ConformityError::UnknownTier`] when the speed is not governed.
pub fn build_report_from_record(
    table: &SpeedTierTable,
    tolerance: &Tolerance,
    nominal_mhz: u32,
    record: &ValidationRecord,
) -> Result<ConformityReport, ConformityError> {
    let tier = SpeedTier::from_nominal_mhz(nominal_mhz)?;
    let upstream = record.upstream_failures();
    let mut report = assemble(table, tolerance, tier, &record.spec_conformity, &upstream);
    report.electrical_info.clone_from(&record.electrical_info);
    report.transmission_info.clone_from(&record.transmission_info);
    Ok(report)
}

// ============================================================================
// SECTION: Assembly
// ============================================================================

/// Evaluates the whole schema for a resolved tier.
fn assemble(
    table: &SpeedTierTable,
    tolerance: &Tolerance,
    tier: SpeedTier,
    measurements: &MeasurementSet,
    upstream: &[String],
) -> ConformityReport {
    let results: Vec<_> = derive_for_tier(table, tier)
        .iter()
        .map(|expectation| evaluate(expectation, measurements.get(expectation.name()), tolerance))
        .collect();

    let counts = VerdictCounts::tally(results.iter().map(|result| result.verdict));
    let mut failure_narratives: Vec<String> =
        results.iter().filter_map(|result| result.reason.clone()).collect();
    failure_narratives.extend(upstream.iter().cloned());

    let mut verdict = Verdict::all(results.iter().map(|result| result.verdict));
    if !upstream.is_empty() {
        verdict = Verdict::Fail;
    }

    let schema = table.schema();
    let ignored_parameters: Vec<String> = measurements
        .names()
        .chain(measurements.malformed().iter().map(String::as_str))
        .filter(|name| !schema.contains(name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    let malformed_parameters: Vec<String> = measurements
        .malformed()
        .iter()
        .filter(|name| schema.contains(name))
        .cloned()
        .collect();

    ConformityReport {
        speed_mhz: tier,
        has_failures: counts.failed > 0 || !upstream.is_empty(),
        results,
        failure_narratives,
        verdict,
        counts,
        ignored_parameters,
        malformed_parameters,
        electrical_info: Vec::new(),
        transmission_info: None,
    }
}
