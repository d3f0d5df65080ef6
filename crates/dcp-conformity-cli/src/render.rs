// crates/dcp-conformity-cli/src/render.rs
// ============================================================================
// Module: CLI Renderers
// Description: Text and JSON document shapes for expectations and reports.
// Purpose: Keep presentation out of the command dispatcher so it can be tested.
// Dependencies: dcp-conformity-core, serde
// ============================================================================

//! ## Overview
//! Text output mirrors the operator table: Parameter, Expected, Got, Result,
//! followed by the transmission and electrical sections and the failure
//! panel. Columns are padded by character count so unit symbols align.

// ============================================================================
// SECTION: Imports
// ============================================================================

use dcp_conformity_core::ConformityReport;
use dcp_conformity_core::Expectation;
use dcp_conformity_core::SpeedTier;
use serde::Serialize;

use crate::t;

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// JSON document emitted by `expectations --format json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectationsDocument {
    /// Requested tier.
    pub speed_mhz: SpeedTier,
    /// Tier delta with unit, e.g. `2.5 µs`.
    pub delta: String,
    /// Derived expectations in schema order.
    pub expectations: Vec<Expectation>,
}

impl ExpectationsDocument {
    /// Renders the document as indented text lines.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = t!("expectations.header", speed = self.speed_mhz, delta = self.delta);
        output.push('\n');
        for expectation in &self.expectations {
            output.push_str(&t!(
                "expectations.entry",
                parameter = expectation.name(),
                expected = expectation.formatted_expected
            ));
            output.push('\n');
        }
        output
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Renders a report as operator-facing text.
#[must_use]
pub fn report_text(report: &ConformityReport) -> String {
    let view = report.view();
    let mut output = String::new();
    push_line(&mut output, &t!("report.header", speed = view.speed, verdict = report.verdict));
    push_line(
        &mut output,
        &t!(
            "report.counts",
            passed = report.counts.passed,
            failed = report.counts.failed,
            unknown = report.counts.unknown
        ),
    );
    output.push('\n');

    let headers = [
        t!("report.column.parameter"),
        t!("report.column.expected"),
        t!("report.column.got"),
        t!("report.column.result"),
    ];
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            vec![row.parameter.clone(), row.expected.clone(), row.got.clone(), row.result.clone()]
        })
        .collect();
    output.push_str(&render_table(&headers, &rows));

    if !view.transmission.is_empty() {
        output.push('\n');
        push_line(&mut output, &t!("report.transmission.header"));
        let headers =
            [t!("report.column.check"), t!("report.column.value"), t!("report.column.result")];
        let rows: Vec<Vec<String>> = view
            .transmission
            .iter()
            .map(|row| vec![row.check.clone(), row.value.clone(), row.result.clone()])
            .collect();
        output.push_str(&render_table(&headers, &rows));
    }

    if !view.electrical.is_empty() {
        output.push('\n');
        push_line(&mut output, &t!("report.electrical.header"));
        for reading in &view.electrical {
            push_line(
                &mut output,
                &t!("report.electrical.entry", name = reading.name, value = reading.value),
            );
        }
    }

    if view.has_failures {
        output.push('\n');
        push_line(&mut output, &t!("report.failures.header"));
        for narrative in &view.failure_details {
            push_line(&mut output, &t!("report.failures.entry", narrative = narrative));
        }
    }

    if !report.ignored_parameters.is_empty() {
        output.push('\n');
        push_line(&mut output, &t!("report.ignored", names = report.ignored_parameters.join(", ")));
    }
    if !report.malformed_parameters.is_empty() {
        push_line(
            &mut output,
            &t!("report.malformed", names = report.malformed_parameters.join(", ")),
        );
    }
    output
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends `line` and a newline.
fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push('\n');
}

/// Renders a left-aligned table with two-space column gaps.
///
/// Widths are measured in characters; the last column is not padded.
pub(crate) fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();
    push_line(&mut output, &render_row(headers, &widths));
    for row in rows {
        push_line(&mut output, &render_row(row, &widths));
    }
    output
}

/// Pads every cell but the last to its column width.
fn render_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (index, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if index < last {
            let width = widths.get(index).copied().unwrap_or(0);
            let padding = width.saturating_sub(cell.chars().count()) + 2;
            line.extend(std::iter::repeat_n(' ', padding));
        }
    }
    line
}
