//! Validation tests for dcp-conformity-config.
// crates/dcp-conformity-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Defaults, tolerance bounds, multiplier overrides, and audit paths.
// Purpose: Ensure invalid configuration fails closed with a precise message.
// =============================================================================

use dcp_conformity_config::AuditConfig;
use dcp_conformity_core::ExpectedValue;
use dcp_conformity_core::SpeedTier;
use dcp_conformity_core::Tolerance;
use dcp_conformity_core::derive_for_tier;

mod common;

use common::TestResult;
use common::assert_invalid;

// ============================================================================
// SECTION: Defaults
// ============================================================================

#[test]
fn empty_config_uses_defaults() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.audit != AuditConfig::default() {
        return Err("audit should default to disabled".to_string());
    }
    let engine = config.engine().map_err(|err| err.to_string())?;
    if engine.tolerance() != &Tolerance::default() {
        return Err("tolerance should default to 0.02".to_string());
    }
    if engine.table().schema() != &dcp_conformity_core::ParameterSchema::standard() {
        return Err("schema should default to the standard schema".to_string());
    }
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let result = common::config_from_toml("[evaluation]\ntolerence = 0.05\n");
    match result {
        Err(err) if err.to_string().contains("unknown field") => Ok(()),
        Err(err) => Err(format!("unexpected parse error: {err}")),
        Ok(_) => Err("typo should be rejected".to_string()),
    }
}

#[test]
fn unknown_sections_are_rejected() -> TestResult {
    match common::config_from_toml("[server]\nbind = \"127.0.0.1:8080\"\n") {
        Err(_) => Ok(()),
        Ok(_) => Err("unknown section should be rejected".to_string()),
    }
}

// ============================================================================
// SECTION: Tolerance
// ============================================================================

#[test]
fn tolerance_within_bounds_is_accepted() -> TestResult {
    let config = common::config_from_toml("[evaluation]\ntolerance = 0.05\n")
        .map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    let engine = config.engine().map_err(|err| err.to_string())?;
    let expected = "0.05".parse::<Tolerance>().map_err(|err| err.to_string())?;
    if engine.tolerance() != &expected {
        return Err("tolerance override was not applied".to_string());
    }
    Ok(())
}

#[test]
fn tolerance_zero_is_rejected() -> TestResult {
    let config = common::config_from_toml("[evaluation]\ntolerance = 0.0\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "evaluation.tolerance")
}

#[test]
fn tolerance_one_is_rejected() -> TestResult {
    let config = common::config_from_toml("[evaluation]\ntolerance = 1.0\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "evaluation.tolerance")
}

#[test]
fn tolerance_nan_is_rejected() -> TestResult {
    let config = common::config_from_toml("[evaluation]\ntolerance = nan\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "invalid tolerance")
}

// ============================================================================
// SECTION: Multipliers
// ============================================================================

#[test]
fn bit_high_time_override_changes_expectation() -> TestResult {
    let config = common::config_from_toml("[schema.multipliers]\n\"Bit High Time\" = 3.0\n")
        .map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    let engine = config.engine().map_err(|err| err.to_string())?;
    let expectations = derive_for_tier(engine.table(), SpeedTier::Mhz4);
    let bit_high = expectations
        .iter()
        .find(|expectation| expectation.name() == "Bit High Time")
        .ok_or("missing Bit High Time")?;
    if bit_high.expected_value != ExpectedValue::Number(60_i32.into()) {
        return Err("Bit High Time should be 3 x 20 µs".to_string());
    }
    if bit_high.formatted_expected != "60 µs" {
        return Err(format!("unexpected formatting {}", bit_high.formatted_expected));
    }
    Ok(())
}

#[test]
fn unknown_parameter_override_is_rejected() -> TestResult {
    let config = common::config_from_toml("[schema.multipliers]\n\"Bit Width\" = 2.0\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "unknown parameter: Bit Width")
}

#[test]
fn speed_override_is_rejected() -> TestResult {
    let config = common::config_from_toml("[schema.multipliers]\nSpeed = 2.0\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "not derived from the tier delta")
}

#[test]
fn negative_override_is_rejected() -> TestResult {
    let config = common::config_from_toml("[schema.multipliers]\n\"Sync Time\" = -25.0\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.engine(), "greater than zero")
}

#[test]
fn infinite_override_is_rejected() -> TestResult {
    let config = common::config_from_toml("[schema.multipliers]\n\"Sync Time\" = inf\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "must be finite")
}

// ============================================================================
// SECTION: Audit
// ============================================================================

#[test]
fn audit_path_must_be_non_empty() -> TestResult {
    let config = common::config_from_toml("[audit]\nenabled = true\npath = \"  \"\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "audit.path must be non-empty")
}

#[test]
fn audit_path_is_accepted() -> TestResult {
    let config =
        common::config_from_toml("[audit]\nenabled = true\npath = \"logs/dcp-audit.jsonl\"\n")
            .map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if !config.audit.enabled || config.audit.path.as_deref() != Some("logs/dcp-audit.jsonl") {
        return Err("audit settings not parsed".to_string());
    }
    Ok(())
}
