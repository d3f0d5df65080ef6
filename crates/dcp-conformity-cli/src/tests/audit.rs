// crates/dcp-conformity-cli/src/tests/audit.rs
// ============================================================================
// Module: CLI Audit Tests
// Description: Unit tests for audit event payloads and sinks.
// Purpose: Ensure audit records carry the report summary as JSON lines.
// Dependencies: dcp-conformity-cli audit module, tempfile
// ============================================================================

//! ## Overview
//! Builds reports with the standard engine and checks the emitted audit
//! payloads, the append-only file sink, and sink selection from config.

use std::fs;

use dcp_conformity_config::AuditConfig;
use dcp_conformity_core::ConformityEngine;
use dcp_conformity_core::ConformityReport;
use dcp_conformity_core::MeasurementSet;
use dcp_conformity_core::Verdict;
use serde_json::Value;

use crate::audit::AuditSink;
use crate::audit::ConformityReportEvent;
use crate::audit::FileAuditSink;
use crate::audit::TierRejectedEvent;
use crate::audit::sink_from_config;

fn failing_report() -> ConformityReport {
    let measurements = MeasurementSet::new()
        .with("Speed", 32.0)
        .with("Bit High Time", 5.2)
        .with("Bus Yield", true)
        .with("Vendor Field", 1.0);
    ConformityEngine::standard()
        .build_report(32, &measurements, &["Sync time too long".to_string()])
        .expect("tier 32 is governed")
}

#[test]
fn report_event_summarizes_report() {
    let report = failing_report();
    let event = ConformityReportEvent::new(&report, 1);
    let value = serde_json::to_value(&event).expect("serialize event");
    assert_eq!(value["event"], "conformity_report");
    assert_eq!(value["speed_mhz"], 32);
    assert_eq!(value["passed"], 2);
    assert_eq!(value["failed"], 1);
    assert_eq!(value["unknown"], 5);
    assert_eq!(value["upstream_failures"], 1);
    assert_eq!(value["ignored_parameters"], serde_json::json!(["Vendor Field"]));
    assert_eq!(value["has_failures"], true);
    assert_eq!(value["verdict"], "FAIL");
    assert!(value["timestamp_ms"].as_u64().is_some_and(|ms| ms > 0));
}

#[test]
fn tier_rejected_event_records_requested_speed() {
    let value = serde_json::to_value(TierRejectedEvent::new(99)).expect("serialize event");
    assert_eq!(value["event"], "tier_rejected");
    assert_eq!(value["speed_mhz"], 99);
}

#[test]
fn file_sink_appends_json_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit.jsonl");
    fs::write(&path, "").expect("seed file");
    let report = failing_report();
    {
        let sink = FileAuditSink::new(&path).expect("open sink");
        sink.record_report(&ConformityReportEvent::new(&report, 1));
        sink.record_tier_rejected(&TierRejectedEvent::new(7));
    }
    {
        let sink = FileAuditSink::new(&path).expect("reopen sink");
        sink.record_tier_rejected(&TierRejectedEvent::new(8));
    }
    let content = fs::read_to_string(&path).expect("read audit log");
    let events: Vec<Value> =
        content.lines().map(|line| serde_json::from_str(line).expect("json line")).collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["event"], "conformity_report");
    assert_eq!(events[0]["verdict"], "FAIL");
    assert_eq!(events[1]["speed_mhz"], 7);
    assert_eq!(events[2]["speed_mhz"], 8);
}

#[test]
fn disabled_audit_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit.jsonl");
    let config = AuditConfig {
        enabled: false,
        path: Some(path.to_string_lossy().into_owned()),
    };
    let sink = sink_from_config(&config).expect("sink");
    sink.record_tier_rejected(&TierRejectedEvent::new(99));
    assert!(!path.exists());
}

#[test]
fn enabled_audit_with_path_creates_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit.jsonl");
    let config = AuditConfig {
        enabled: true,
        path: Some(path.to_string_lossy().into_owned()),
    };
    let sink = sink_from_config(&config).expect("sink");
    let report = failing_report();
    sink.record_report(&ConformityReportEvent::new(&report, 0));
    let content = fs::read_to_string(&path).expect("read audit log");
    assert_eq!(content.lines().count(), 1);
    assert_eq!(report.verdict, Verdict::Fail);
}

#[test]
fn enabled_audit_fails_for_unwritable_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing-dir").join("audit.jsonl");
    let config = AuditConfig {
        enabled: true,
        path: Some(path.to_string_lossy().into_owned()),
    };
    assert!(sink_from_config(&config).is_err());
}
