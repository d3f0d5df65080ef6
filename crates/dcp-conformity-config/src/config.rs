// crates/dcp-conformity-config/src/config.rs
// ============================================================================
// Module: DCP Validator Configuration
// Description: Configuration loading and validation for the DCP validator.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: dcp-conformity-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! An explicitly requested file (argument or environment) must exist; the
//! default file name is optional and built-in defaults apply when it is absent.
//! Unknown keys are rejected so a typo never silently keeps a default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use dcp_conformity_core::ConformityEngine;
use dcp_conformity_core::ParameterSchema;
use dcp_conformity_core::SpeedTierTable;
use dcp_conformity_core::Tolerance;
use dcp_conformity_core::values::decimal_from_f64;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "dcp-validator.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DCP_VALIDATOR_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default relative tolerance (±2%).
const DEFAULT_TOLERANCE: f64 = 0.02;

// ============================================================================
// SECTION: Validator Config
// ============================================================================

/// Root configuration for the DCP validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Evaluation settings.
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    /// Parameter schema overrides.
    #[serde(default)]
    pub schema: SchemaConfig,
    /// Audit log settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// File the config was loaded from, when any (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl ValidatorConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: `path`, then `DCP_VALIDATOR_CONFIG`, then
    /// `dcp-validator.toml` in the working directory. Only the last one may be
    /// absent, in which case built-in defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.source_path = Some(resolved);
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evaluation.validate()?;
        self.schema.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Builds a conformity engine from the configured tolerance and schema.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the tolerance or an override is invalid.
    pub fn engine(&self) -> Result<ConformityEngine, ConfigError> {
        let tolerance = self.evaluation.tolerance()?;
        let schema = self.schema.parameter_schema()?;
        Ok(ConformityEngine::new(SpeedTierTable::with_schema(schema), tolerance))
    }
}

// ============================================================================
// SECTION: Evaluation Config
// ============================================================================

/// Numeric comparison settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Relative tolerance fraction, `0 < tolerance < 1`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl EvaluationConfig {
    /// Returns the validated tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the fraction is out of range.
    pub fn tolerance(&self) -> Result<Tolerance, ConfigError> {
        Tolerance::new(self.tolerance)
            .map_err(|err| ConfigError::Invalid(format!("evaluation.tolerance: {err}")))
    }

    /// Validates evaluation settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.tolerance().map(|_| ())
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

/// Serde default for [`EvaluationConfig::tolerance`].
const fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

// ============================================================================
// SECTION: Schema Config
// ============================================================================

/// Parameter schema overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Delta multipliers keyed by parameter display name.
    #[serde(default)]
    pub multipliers: BTreeMap<String, f64>,
}

impl SchemaConfig {
    /// Applies the overrides to the standard schema.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for non-finite values, unknown names,
    /// parameters not derived from the delta, or non-positive multipliers.
    pub fn parameter_schema(&self) -> Result<ParameterSchema, ConfigError> {
        let mut schema = ParameterSchema::standard();
        for (name, multiplier) in &self.multipliers {
            let decimal = decimal_from_f64(*multiplier).ok_or_else(|| {
                ConfigError::Invalid(format!("schema.multipliers.\"{name}\" must be finite"))
            })?;
            schema = schema
                .with_multiplier(name, decimal)
                .map_err(|err| ConfigError::Invalid(format!("schema.multipliers: {err}")))?;
        }
        Ok(schema)
    }

    /// Validates schema overrides.
    fn validate(&self) -> Result<(), ConfigError> {
        self.parameter_schema().map(|_| ())
    }
}

// ============================================================================
// SECTION: Audit Config
// ============================================================================

/// Audit log settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Emits audit events when true.
    #[serde(default)]
    pub enabled: bool,
    /// JSON-lines file to append to; stderr when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
///
/// The flag is true when the path was requested explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    validate_path(Path::new(trimmed))
        .map_err(|_| ConfigError::Invalid(format!("{field} exceeds path limits")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
