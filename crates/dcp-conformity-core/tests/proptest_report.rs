// crates/dcp-conformity-core/tests/proptest_report.rs
// ============================================================================
// Module: Report Property-Based Tests
// Description: Property tests for report determinism and band symmetry.
// Purpose: Detect panics and ordering drift across wide measurement ranges.
// ============================================================================

//! Property-based tests for report invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use dcp_conformity_core::ConformityEngine;
use dcp_conformity_core::MeasurementSet;
use dcp_conformity_core::ParameterValue;
use dcp_conformity_core::SpeedTier;
use dcp_conformity_core::Verdict;
use dcp_conformity_core::derive_for_tier;
use dcp_conformity_core::parameter_names;
use proptest::prelude::*;

fn tier_strategy() -> impl Strategy<Value = SpeedTier> {
    prop::sample::select(SpeedTier::ALL.to_vec())
}

fn value_strategy() -> impl Strategy<Value = ParameterValue> {
    prop_oneof![
        any::<bool>().prop_map(ParameterValue::Boolean),
        (-1.0e6 .. 1.0e6f64).prop_map(ParameterValue::Number),
        Just(ParameterValue::Number(f64::INFINITY)),
    ]
}

fn measurement_strategy() -> impl Strategy<Value = MeasurementSet> {
    let names = prop::sample::select(vec![
        parameter_names::SPEED,
        parameter_names::BIT_HIGH_TIME,
        parameter_names::BIT_LOW_TIME,
        parameter_names::SYNC_TIME,
        parameter_names::BIT_SYNC_TIME,
        parameter_names::BIT_SYNC_HIGH,
        parameter_names::BIT_SYNC_LOW,
        parameter_names::BUS_YIELD,
        "Unlisted",
    ]);
    prop::collection::vec((names, value_strategy()), 0 .. 12).prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn build_report_is_deterministic(
        tier in tier_strategy(),
        measurements in measurement_strategy(),
        upstream in prop::collection::vec("[a-z ]{0,12}", 0 .. 3),
    ) {
        let engine = ConformityEngine::standard();
        let first = engine.build_report(tier.nominal_mhz(), &measurements, &upstream).unwrap();
        let second = engine.build_report(tier.nominal_mhz(), &measurements, &upstream).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.results.len(), 8);
        prop_assert_eq!(first.counts.total(), 8);
        prop_assert_eq!(first.has_failures, first.counts.failed > 0 || !upstream.is_empty());
        prop_assert_eq!(first.failure_narratives.len(), first.counts.failed + upstream.len());
        for result in &first.results {
            prop_assert_eq!(result.reason.is_some(), result.verdict == Verdict::Fail);
        }
    }

    #[test]
    fn band_is_symmetric_around_expectation(tier in tier_strategy(), offset in 0.0 .. 0.05f64) {
        let engine = ConformityEngine::standard();
        for expectation in derive_for_tier(engine.table(), tier) {
            let ParameterValue::Number(expected) = expectation.expected_value.to_parameter_value() else {
                continue;
            };
            let above = engine.evaluate(&expectation, Some((expected * (1.0 + offset)).into()));
            let below = engine.evaluate(&expectation, Some((expected * (1.0 - offset)).into()));
            if offset < 0.019 {
                prop_assert_eq!(above.verdict, Verdict::Pass);
                prop_assert_eq!(below.verdict, Verdict::Pass);
            }
            if offset > 0.021 {
                prop_assert_eq!(above.verdict, Verdict::Fail);
                prop_assert_eq!(below.verdict, Verdict::Fail);
            }
        }
    }
}
