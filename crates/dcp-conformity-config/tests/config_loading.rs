//! File loading tests for dcp-conformity-config.
// crates/dcp-conformity-config/tests/config_loading.rs
// =============================================================================
// Module: Config Loading Tests
// Description: Reads config files from temporary directories.
// Purpose: Ensure size, encoding, and existence rules are enforced on load.
// =============================================================================

use std::fs;

use dcp_conformity_config::ValidatorConfig;

mod common;

use common::TestResult;
use common::assert_invalid;

#[test]
fn loads_explicit_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("dcp-validator.toml");
    fs::write(&path, "[evaluation]\ntolerance = 0.03\n\n[audit]\nenabled = true\n")
        .map_err(|err| err.to_string())?;
    let config = ValidatorConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.source_path.as_deref() != Some(path.as_path()) {
        return Err("source path not recorded".to_string());
    }
    if !config.audit.enabled {
        return Err("audit flag not loaded".to_string());
    }
    Ok(())
}

#[test]
fn missing_explicit_file_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(ValidatorConfig::load(Some(&path)), "config io error")
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("big.toml");
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    fs::write(&path, padding).map_err(|err| err.to_string())?;
    assert_invalid(ValidatorConfig::load(Some(&path)), "exceeds size limit")
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("latin1.toml");
    fs::write(&path, [0x23, 0x20, 0xE9, 0x0A]).map_err(|err| err.to_string())?;
    assert_invalid(ValidatorConfig::load(Some(&path)), "must be utf-8")
}

#[test]
fn malformed_toml_is_a_parse_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[evaluation\ntolerance = 0.02\n").map_err(|err| err.to_string())?;
    assert_invalid(ValidatorConfig::load(Some(&path)), "config parse error")
}

#[test]
fn invalid_values_fail_on_load() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("invalid.toml");
    fs::write(&path, "[schema.multipliers]\n\"Bus Yield\" = 1.0\n").map_err(|err| err.to_string())?;
    assert_invalid(ValidatorConfig::load(Some(&path)), "invalid config")
}
