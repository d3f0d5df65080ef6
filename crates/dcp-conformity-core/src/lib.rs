// crates/dcp-conformity-core/src/lib.rs
// ============================================================================
// Module: DCP Conformity Core Library
// Description: Public API surface for the DCP timing conformity engine.
// Purpose: Expose tier tables, parameter schema, and the evaluation runtime.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! DCP conformity core decides whether a measured DCP bus device matches the
//! timing requirements of its declared speed tier. It derives expected values
//! from the speed tier table, compares measurements with tolerance or exact
//! equality rules, and aggregates a deterministic report with failure
//! narratives. The engine performs no I/O and holds no mutable state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use runtime::ConformityEngine;
pub use runtime::Expectation;
pub use runtime::ExpectedValue;
pub use runtime::Tolerance;
pub use runtime::build_report;
pub use runtime::build_report_from_record;
pub use runtime::derive_expectations;
pub use runtime::derive_for_tier;
pub use runtime::evaluate;
