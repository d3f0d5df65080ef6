// crates/dcp-conformity-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for dcp-conformity-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use dcp_conformity_config::ConfigError;
use dcp_conformity_config::ValidatorConfig;

/// Result alias for tests that report failures as strings.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `ValidatorConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<ValidatorConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<ValidatorConfig, toml::de::Error> {
    config_from_toml("")
}

/// Assert that a validation result is an error containing a specific substring.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
