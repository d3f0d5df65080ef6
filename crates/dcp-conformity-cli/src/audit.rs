// crates/dcp-conformity-cli/src/audit.rs
// ============================================================================
// Module: Validator Audit Logging
// Description: Structured audit events for conformity evaluations.
// Purpose: Emit JSON-lines audit records without a logging framework.
// Dependencies: dcp-conformity-core, dcp-conformity-config, serde, serde_json
// ============================================================================

//! ## Overview
//! Every evaluated report and every rejected speed request can be recorded as
//! one JSON object per line. Sinks write to stderr, append to a file, or drop
//! events. Audit output never changes a command's result: write failures are
//! swallowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use dcp_conformity_config::AuditConfig;
use dcp_conformity_core::ConformityReport;
use dcp_conformity_core::Verdict;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event emitted after a report is built.
#[derive(Debug, Clone, Serialize)]
pub struct ConformityReportEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Evaluated tier in MHz.
    pub speed_mhz: u32,
    /// Passing parameters.
    pub passed: usize,
    /// Failing parameters.
    pub failed: usize,
    /// Parameters without usable evidence.
    pub unknown: usize,
    /// Upstream failure narratives carried by the record.
    pub upstream_failures: usize,
    /// Measurement names outside the schema.
    pub ignored_parameters: Vec<String>,
    /// Whether the report shows failures.
    pub has_failures: bool,
    /// Overall verdict.
    pub verdict: Verdict,
}

impl ConformityReportEvent {
    /// Builds the event for `report`.
    #[must_use]
    pub fn new(report: &ConformityReport, upstream_failures: usize) -> Self {
        Self {
            event: "conformity_report",
            timestamp_ms: now_ms(),
            speed_mhz: report.speed_mhz.nominal_mhz(),
            passed: report.counts.passed,
            failed: report.counts.failed,
            unknown: report.counts.unknown,
            upstream_failures,
            ignored_parameters: report.ignored_parameters.clone(),
            has_failures: report.has_failures,
            verdict: report.verdict,
        }
    }
}

/// Audit event emitted when a requested speed is not a governed tier.
#[derive(Debug, Clone, Serialize)]
pub struct TierRejectedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Requested speed in MHz.
    pub speed_mhz: u32,
}

impl TierRejectedEvent {
    /// Builds the event for a rejected speed.
    #[must_use]
    pub fn new(speed_mhz: u32) -> Self {
        Self {
            event: "tier_rejected",
            timestamp_ms: now_ms(),
            speed_mhz,
        }
    }
}

/// Milliseconds since the Unix epoch; zero if the clock is before it.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for validator events.
pub trait AuditSink: Send + Sync {
    /// Record a report event.
    fn record_report(&self, event: &ConformityReportEvent);

    /// Record a rejected speed request.
    fn record_tier_rejected(&self, _event: &TierRejectedEvent) {}
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_report(&self, event: &ConformityReportEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_tier_rejected(&self, event: &TierRejectedEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_report(&self, event: &ConformityReportEvent) {
        self.append(event);
    }

    fn record_tier_rejected(&self, event: &TierRejectedEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_report(&self, _event: &ConformityReportEvent) {}

    fn record_tier_rejected(&self, _event: &TierRejectedEvent) {}
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the sink selected by `[audit]`.
///
/// Disabled audit yields [`NoopAuditSink`]; enabled audit without a path
/// writes to stderr.
///
/// # Errors
///
/// Returns an error when the configured audit file cannot be opened.
pub fn sink_from_config(config: &AuditConfig) -> io::Result<Box<dyn AuditSink>> {
    if !config.enabled {
        return Ok(Box::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => Ok(Box::new(FileAuditSink::new(Path::new(path))?)),
        None => Ok(Box::new(StderrAuditSink)),
    }
}
