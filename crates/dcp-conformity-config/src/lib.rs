// crates/dcp-conformity-config/src/lib.rs
// ============================================================================
// Module: DCP Conformity Config Library
// Description: Canonical validator config model and validation.
// Purpose: Single source of truth for dcp-validator.toml semantics.
// Dependencies: dcp-conformity-core, serde, toml
// ============================================================================

//! ## Overview
//! `dcp-conformity-config` defines the configuration model for the DCP
//! validator: the tolerance band, per-parameter multiplier overrides, and the
//! audit sink. Validation is strict and fail-closed; a validated config turns
//! into a ready-to-use [`dcp_conformity_core::ConformityEngine`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
