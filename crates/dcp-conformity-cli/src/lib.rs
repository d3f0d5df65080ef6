// crates/dcp-conformity-cli/src/lib.rs
// ============================================================================
// Module: DCP Validator CLI Library
// Description: Shared helpers for the `dcp-validator` command-line interface.
// Purpose: Provide the message catalog, audit sinks, and renderers.
// Dependencies: dcp-conformity-core, dcp-conformity-config, serde, serde_json
// ============================================================================

//! ## Overview
//! This library houses the pieces of the validator CLI that are worth testing
//! without spawning the binary: the message catalog, the JSON-lines audit
//! sinks, and the text renderers. The binary entry point (`src/main.rs`)
//! wires them to command-line arguments.
//!
//! Validation records and config files are untrusted; the binary bounds their
//! size before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Audit events and sinks.
pub mod audit;
/// Message catalog and translation helpers.
pub mod i18n;
/// Text and JSON renderers.
pub mod render;

#[cfg(test)]
mod tests;
