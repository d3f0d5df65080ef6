// crates/dcp-conformity-core/src/runtime/mod.rs
// ============================================================================
// Module: DCP Conformity Runtime
// Description: Expectation derivation, evaluation, and report aggregation.
// Purpose: Turn a speed tier plus measurements into a conformity report.
// Dependencies: bigdecimal, crate::core
// ============================================================================

//! ## Overview
//! Runtime modules are pure functions over the read-only tier table. Every
//! caller surface (library, CLI) goes through [`ConformityEngine`] or the same
//! free functions it wraps, so verdicts never depend on the entry point.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod aggregator;
pub mod deriver;
pub mod engine;
pub mod evaluator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use aggregator::build_report;
pub use aggregator::build_report_from_record;
pub use deriver::Expectation;
pub use deriver::ExpectedValue;
pub use deriver::derive_expectations;
pub use deriver::derive_for_tier;
pub use engine::ConformityEngine;
pub use evaluator::Tolerance;
pub use evaluator::evaluate;
