// crates/dcp-conformity-core/tests/tier_table.rs
// ============================================================================
// Module: Speed Tier Table Tests
// Description: Delta lookup and schema shape for every governed tier.
// Purpose: Pin the governed delta table and the eight-parameter schema.
// ============================================================================

//! Speed tier table and parameter schema tests.

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

use std::str::FromStr;

use bigdecimal::BigDecimal;
use dcp_conformity_core::ConformityError;
use dcp_conformity_core::ParameterKind;
use dcp_conformity_core::ParameterSchema;
use dcp_conformity_core::SpeedTier;
use dcp_conformity_core::SpeedTierTable;
use dcp_conformity_core::UNIT_MEGAHERTZ;
use dcp_conformity_core::UNIT_MICROSECONDS;
use dcp_conformity_core::parameter_names;

fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).expect("decimal literal")
}

#[test]
fn deltas_match_governed_table() {
    let table = SpeedTierTable::standard();
    assert_eq!(table.delta_for(4).unwrap(), &dec("20"));
    assert_eq!(table.delta_for(20).unwrap(), &dec("4"));
    assert_eq!(table.delta_for(32).unwrap(), &dec("2.5"));
    assert_eq!(table.delta_for(64).unwrap(), &dec("1.25"));
}

#[test]
fn deltas_strictly_decrease_with_speed() {
    let table = SpeedTierTable::standard();
    let entries: Vec<_> = table.entries().collect();
    assert_eq!(entries.len(), 4);
    for pair in entries.windows(2) {
        assert!(pair[0].0.nominal_mhz() < pair[1].0.nominal_mhz());
        assert!(pair[0].1 > pair[1].1);
    }
}

#[test]
fn unknown_tier_is_rejected() {
    let table = SpeedTierTable::standard();
    let err = table.delta_for(99).unwrap_err();
    assert_eq!(
        err,
        ConformityError::UnknownTier {
            nominal_mhz: 99
        }
    );
    assert!(err.to_string().contains("unsupported device speed"));
    assert!(SpeedTier::try_from(0_u32).is_err());
}

#[test]
fn tier_serializes_as_nominal_mhz() {
    let encoded = serde_json::to_string(&SpeedTier::Mhz32).unwrap();
    assert_eq!(encoded, "32");
    let decoded: SpeedTier = serde_json::from_str("64").unwrap();
    assert_eq!(decoded, SpeedTier::Mhz64);
    assert!(serde_json::from_str::<SpeedTier>("99").is_err());
    assert_eq!(SpeedTier::Mhz4.to_string(), "4 MHz");
}

#[test]
fn schema_has_eight_parameters_in_report_order() {
    let table = SpeedTierTable::standard();
    let names: Vec<&str> = table.parameter_definitions().iter().map(|p| p.name()).collect();
    assert_eq!(
        names,
        [
            parameter_names::SPEED,
            parameter_names::BIT_HIGH_TIME,
            parameter_names::BIT_LOW_TIME,
            parameter_names::SYNC_TIME,
            parameter_names::BIT_SYNC_TIME,
            parameter_names::BIT_SYNC_HIGH,
            parameter_names::BIT_SYNC_LOW,
            parameter_names::BUS_YIELD,
        ]
    );
}

#[test]
fn unit_present_iff_numeric() {
    let schema = ParameterSchema::standard();
    for definition in schema.definitions() {
        match definition.kind() {
            ParameterKind::NumericWithUnit => assert!(definition.unit().is_some()),
            ParameterKind::Boolean => assert!(definition.unit().is_none()),
        }
    }
    assert_eq!(schema.get(parameter_names::SPEED).unwrap().unit(), Some(UNIT_MEGAHERTZ));
    assert_eq!(schema.get(parameter_names::SYNC_TIME).unwrap().unit(), Some(UNIT_MICROSECONDS));
}

#[test]
fn standard_multipliers() {
    let schema = ParameterSchema::standard();
    let multiplier = |name: &str| schema.get(name).unwrap().multiplier().cloned();
    assert_eq!(multiplier(parameter_names::SPEED), None);
    assert_eq!(multiplier(parameter_names::BIT_HIGH_TIME), Some(dec("2")));
    assert_eq!(multiplier(parameter_names::BIT_LOW_TIME), Some(dec("1")));
    assert_eq!(multiplier(parameter_names::SYNC_TIME), Some(dec("25")));
    assert_eq!(multiplier(parameter_names::BIT_SYNC_TIME), Some(dec("15")));
    assert_eq!(multiplier(parameter_names::BIT_SYNC_HIGH), Some(dec("7.5")));
    assert_eq!(multiplier(parameter_names::BIT_SYNC_LOW), Some(dec("7.5")));
    assert_eq!(multiplier(parameter_names::BUS_YIELD), None);
}

#[test]
fn multiplier_override_replaces_only_target() {
    let schema = ParameterSchema::standard()
        .with_multiplier(parameter_names::BIT_HIGH_TIME, dec("3"))
        .unwrap();
    assert_eq!(schema.get(parameter_names::BIT_HIGH_TIME).unwrap().multiplier(), Some(&dec("3")));
    assert_eq!(schema.get(parameter_names::BIT_LOW_TIME).unwrap().multiplier(), Some(&dec("1")));
    assert_eq!(schema.len(), 8);
}

#[test]
fn multiplier_override_rejections() {
    let unknown = ParameterSchema::standard().with_multiplier("Bit Width", dec("2")).unwrap_err();
    assert_eq!(unknown, ConformityError::UnknownParameter("Bit Width".to_string()));

    let not_scaled =
        ParameterSchema::standard().with_multiplier(parameter_names::SPEED, dec("2")).unwrap_err();
    assert!(matches!(not_scaled, ConformityError::InvalidMultiplier { .. }));

    let zero = ParameterSchema::standard()
        .with_multiplier(parameter_names::SYNC_TIME, dec("0"))
        .unwrap_err();
    assert!(matches!(zero, ConformityError::InvalidMultiplier { .. }));
}

#[test]
fn duplicate_definitions_are_rejected() {
    let definitions = ParameterSchema::standard().definitions().to_vec();
    let mut doubled = definitions.clone();
    doubled.push(definitions[1].clone());
    let err = ParameterSchema::new(doubled).unwrap_err();
    assert_eq!(err, ConformityError::DuplicateParameter(parameter_names::BIT_HIGH_TIME.to_string()));
    assert_eq!(ParameterSchema::new(definitions).unwrap(), ParameterSchema::standard());
}
