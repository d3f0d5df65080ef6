// crates/dcp-conformity-core/src/core/measurement/tests.rs
// ============================================================================
// Module: Measurement Set Tests
// Description: Unit tests for loose measurement decoding.
// Purpose: Ensure bad values are isolated per name instead of failing the record.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Decodes hand-written `specConformity` mappings and checks which names
//! survive as usable measurements.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::MeasurementSet;
use crate::core::values::ParameterValue;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn unusable_values_are_recorded_as_malformed() {
    let set: MeasurementSet = serde_json::from_value(json!({
        "Speed": 32,
        "Bus Yield": true,
        "Sync Time": "62.5",
        "Bit Low Time": null
    }))
    .expect("decode measurements");
    assert_eq!(set.get("Speed"), Some(ParameterValue::Number(32.0)));
    assert_eq!(set.get("Bus Yield"), Some(ParameterValue::Boolean(true)));
    assert_eq!(set.get("Sync Time"), None);
    assert_eq!(set.malformed(), ["Bit Low Time".to_string(), "Sync Time".to_string()]);
    assert_eq!(set.len(), 2);
}

#[test]
fn null_mapping_is_empty() {
    let set: MeasurementSet = serde_json::from_value(Value::Null).expect("decode null");
    assert!(set.is_empty());
    assert!(set.malformed().is_empty());
}

#[test]
fn serializes_only_usable_values() {
    let set = MeasurementSet::new().with("Speed", 20.0).with("Bus Yield", false);
    let value = serde_json::to_value(&set).expect("encode measurements");
    assert_eq!(value, json!({"Bus Yield": false, "Speed": 20.0}));
}

#[test]
fn collects_from_pairs() {
    let set: MeasurementSet = [("Bit Low Time", 4.0), ("Sync Time", 100.0)].into_iter().collect();
    assert_eq!(set.names().collect::<Vec<_>>(), ["Bit Low Time", "Sync Time"]);
}

#[test]
fn out_of_range_number_is_malformed_without_rejecting_the_set() {
    let set: MeasurementSet =
        serde_json::from_str(r#"{"Speed": 32, "Bit High Time": 1e400, "Bus Yield": true}"#)
            .expect("decode measurements");
    assert_eq!(set.get("Speed"), Some(ParameterValue::Number(32.0)));
    assert_eq!(set.get("Bus Yield"), Some(ParameterValue::Boolean(true)));
    assert_eq!(set.get("Bit High Time"), None);
    assert_eq!(set.malformed(), ["Bit High Time".to_string()]);
}

#[test]
fn negative_out_of_range_number_is_malformed() {
    let set: MeasurementSet =
        serde_json::from_str(r#"{"Sync Time": -1e999}"#).expect("decode measurements");
    assert!(set.is_empty());
    assert_eq!(set.malformed(), ["Sync Time".to_string()]);
}
