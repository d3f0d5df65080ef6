// crates/dcp-conformity-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Message catalog and translation helpers for the validator CLI.
// Purpose: Keep every user-facing string in one place with named placeholders.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! The validator CLI routes all operator-facing output through a small message
//! catalog. Templates use `{name}` placeholders filled by the
//! [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself.
//! - Placeholders are substituted in argument order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name used in templates (e.g. `"path"`).
    pub key: &'static str,
    /// Value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries.
pub const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("main.version", "dcp-validator {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.serialize_failed", "Failed to serialize output: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    ("input.parse_failed", "Failed to parse {kind} at {path}: {error}"),
    ("input.kind.record", "validation record"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("config.engine_failed", "Invalid conformity settings: {error}"),
    ("audit.open_failed", "Failed to open audit log at {path}: {error}"),
    ("speed.unsupported", "Unsupported device speed {speed} MHz (supported: {supported})."),
    ("evaluation.failed", "Conformity evaluation failed: {error}"),
    ("expectations.header", "Expectations for {speed} (delta {delta}):"),
    ("expectations.entry", "  {parameter}: {expected}"),
    ("report.header", "Conformity report for {speed}: {verdict}"),
    ("report.counts", "Passed {passed}, failed {failed}, unknown {unknown}."),
    ("report.column.parameter", "Parameter"),
    ("report.column.expected", "Expected"),
    ("report.column.got", "Got"),
    ("report.column.result", "Result"),
    ("report.column.check", "Check"),
    ("report.column.value", "Value"),
    ("report.transmission.header", "Transmission:"),
    ("report.electrical.header", "Electrical:"),
    ("report.electrical.entry", "  {name}: {value}"),
    ("report.failures.header", "Failure details:"),
    ("report.failures.entry", "  - {narrative}"),
    ("report.ignored", "Ignored parameters: {names}"),
    ("report.malformed", "Unreadable values: {names}"),
];

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the catalog while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Returns the static catalog.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
