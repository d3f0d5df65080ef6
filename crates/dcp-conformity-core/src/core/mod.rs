// crates/dcp-conformity-core/src/core/mod.rs
// ============================================================================
// Module: DCP Conformity Core Types
// Description: Data model for tiers, parameters, measurements, and reports.
// Purpose: Provide immutable, serializable types shared by the runtime and callers.
// Dependencies: bigdecimal, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe the governed speed tiers, the parameter schema, the
//! untrusted validation record, and the conformity report produced for the UI.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod error;
pub mod measurement;
pub mod record;
pub mod report;
pub mod schema;
pub mod tier;
pub mod values;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ConformityError;
pub use measurement::MeasurementSet;
pub use record::ElectricalReading;
pub use record::FrameType;
pub use record::TransmissionCheck;
pub use record::TransmissionFault;
pub use record::TransmissionInfo;
pub use record::ValidationRecord;
pub use report::ConformityReport;
pub use report::ConformityResult;
pub use report::ReportRow;
pub use report::ReportView;
pub use report::TransmissionRow;
pub use report::Verdict;
pub use report::VerdictCounts;
pub use schema::ExpectationBasis;
pub use schema::ParameterDefinition;
pub use schema::ParameterKind;
pub use schema::ParameterSchema;
pub use schema::UNIT_MEGAHERTZ;
pub use schema::UNIT_MICROSECONDS;
pub use schema::parameter_names;
pub use tier::SpeedTier;
pub use tier::SpeedTierTable;
pub use values::ParameterValue;
