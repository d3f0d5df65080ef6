// crates/dcp-conformity-core/src/core/report.rs
// ============================================================================
// Module: Conformity Report
// Description: Per-parameter verdicts, aggregate report, and the UI table view.
// Purpose: Define the output boundary consumed by report renderers.
// Dependencies: serde, crate::core::{record, tier, values}
// ============================================================================

//! ## Overview
//! Verdicts are tri-state: a parameter with no usable measurement is
//! `Unknown`, which is never confused with `Fail`. The overall verdict is the
//! strong Kleene conjunction of the parameter verdicts, so one failure fails
//! the report and missing evidence alone can only make it unknown.
//!
//! [`ReportView`] flattens a report into the four-column table the UI shows:
//! Parameter, Expected, Got, Result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::record::ElectricalReading;
use crate::core::record::TransmissionInfo;
use crate::core::tier::SpeedTier;
use crate::core::values::ParameterValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Placeholder shown for absent values and unknown verdicts.
pub const PLACEHOLDER: &str = "-";
/// Label of the frame type row in the transmission table.
const FRAME_TYPE_ROW: &str = "Transmission Type";

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Tri-state conformity verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Measurement conforms.
    Pass,
    /// Measurement violates the requirement.
    Fail,
    /// No usable measurement; neither pass nor fail.
    Unknown,
}

impl Verdict {
    /// Strong Kleene conjunction.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Fail, _) | (_, Self::Fail) => Self::Fail,
            (Self::Pass, Self::Pass) => Self::Pass,
            _ => Self::Unknown,
        }
    }

    /// Conjunction over any number of verdicts; `Pass` when empty.
    pub fn all(verdicts: impl IntoIterator<Item = Self>) -> Self {
        verdicts.into_iter().fold(Self::Pass, Self::and)
    }

    /// Table label: `Pass`, `Fail`, or `-`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Unknown => PLACEHOLDER,
        }
    }

    /// Returns true for `Fail`.
    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl From<bool> for Verdict {
    fn from(value: bool) -> Self {
        if value { Self::Pass } else { Self::Fail }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Unknown => "UNKNOWN",
        })
    }
}

// ============================================================================
// SECTION: Conformity Result
// ============================================================================

/// Outcome for one governed parameter.
///
/// # Invariants
/// - `reason` is present iff `verdict` is [`Verdict::Fail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformityResult {
    /// Parameter display name.
    pub parameter: String,
    /// Expected value.
    pub expected: ParameterValue,
    /// Measured value, when supplied.
    pub measured: Option<ParameterValue>,
    /// Expected value as displayed.
    pub formatted_expected: String,
    /// Measured value as displayed, when supplied.
    pub formatted_measured: Option<String>,
    /// Verdict.
    pub verdict: Verdict,
    /// Failure explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ConformityResult {
    /// Flattens the result into a table row.
    #[must_use]
    pub fn row(&self) -> ReportRow {
        let got = match (&self.formatted_measured, self.verdict) {
            (_, Verdict::Unknown) | (None, _) => PLACEHOLDER.to_string(),
            (Some(formatted), _) => formatted.clone(),
        };
        ReportRow {
            parameter: self.parameter.clone(),
            expected: self.formatted_expected.clone(),
            got,
            result: self.verdict.label().to_string(),
        }
    }
}

// ============================================================================
// SECTION: Counts
// ============================================================================

/// Number of results per verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    /// Passing parameters.
    pub passed: usize,
    /// Failing parameters.
    pub failed: usize,
    /// Parameters without usable evidence.
    pub unknown: usize,
}

impl VerdictCounts {
    /// Tallies verdicts.
    pub fn tally(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        verdicts.into_iter().fold(Self::default(), |mut counts, verdict| {
            match verdict {
                Verdict::Pass => counts.passed += 1,
                Verdict::Fail => counts.failed += 1,
                Verdict::Unknown => counts.unknown += 1,
            }
            counts
        })
    }

    /// Total number of results.
    #[must_use]
    pub const fn total(self) -> usize {
        self.passed + self.failed + self.unknown
    }
}

// ============================================================================
// SECTION: Conformity Report
// ============================================================================

/// Aggregate result of one validation run.
///
/// # Invariants
/// - `results` follow schema order, one per governed parameter.
/// - `has_failures` is true iff some result failed or upstream narratives exist.
/// - `failure_narratives` lists engine reasons first, then upstream narratives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformityReport {
    /// Speed tier the expectations were derived for.
    pub speed_mhz: SpeedTier,
    /// Per-parameter outcomes in schema order.
    pub results: Vec<ConformityResult>,
    /// True when any parameter failed or upstream failures were supplied.
    pub has_failures: bool,
    /// Ordered failure explanations.
    pub failure_narratives: Vec<String>,
    /// Overall verdict.
    pub verdict: Verdict,
    /// Number of results per verdict.
    pub counts: VerdictCounts,
    /// Measurement names outside the schema, sorted.
    #[serde(default)]
    pub ignored_parameters: Vec<String>,
    /// Schema names whose supplied value could not be interpreted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub malformed_parameters: Vec<String>,
    /// Electrical readings passed through from the record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub electrical_info: Vec<ElectricalReading>,
    /// Transmission checks passed through from the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission_info: Option<TransmissionInfo>,
}

impl ConformityReport {
    /// Results that failed, in schema order.
    pub fn failures(&self) -> impl Iterator<Item = &ConformityResult> {
        self.results.iter().filter(|result| result.verdict.is_fail())
    }

    /// Looks up the result for a parameter.
    #[must_use]
    pub fn result(&self, parameter: &str) -> Option<&ConformityResult> {
        self.results.iter().find(|result| result.parameter == parameter)
    }

    /// Builds the table view shown to operators.
    #[must_use]
    pub fn view(&self) -> ReportView {
        let transmission = self.transmission_info.as_ref().map_or_else(Vec::new, transmission_rows);
        ReportView {
            speed: self.speed_mhz.to_string(),
            rows: self.results.iter().map(ConformityResult::row).collect(),
            electrical: self.electrical_info.clone(),
            transmission,
            failure_details: self.failure_narratives.clone(),
            has_failures: self.has_failures,
        }
    }
}

/// Builds transmission rows: frame type first, then checks in canonical order.
///
/// Failed checks show their narrative, so a fault-only failure is never blank.
fn transmission_rows(info: &TransmissionInfo) -> Vec<TransmissionRow> {
    let mut rows = Vec::new();
    if let Some(frame_type) = info.frame_type {
        let result = info
            .check(frame_type.label())
            .map_or(PLACEHOLDER, |check| Verdict::from(check.status).label());
        rows.push(TransmissionRow {
            check: FRAME_TYPE_ROW.to_string(),
            value: frame_type.label().to_string(),
            result: result.to_string(),
        });
    }
    rows.extend(info.ordered_checks().into_iter().map(|(name, check)| {
        let value = if check.status {
            check.reason.clone().unwrap_or_default()
        } else {
            check.narrative(name)
        };
        TransmissionRow {
            check: name.to_string(),
            value,
            result: Verdict::from(check.status).label().to_string(),
        }
    }));
    rows
}

// ============================================================================
// SECTION: Report View
// ============================================================================

/// One row of the Parameter / Expected / Got / Result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Parameter name.
    pub parameter: String,
    /// Formatted expected value.
    pub expected: String,
    /// Formatted measured value, or `-`.
    pub got: String,
    /// `Pass`, `Fail`, or `-`.
    pub result: String,
}

/// One row of the transmission table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmissionRow {
    /// Check name.
    pub check: String,
    /// Frame type label, firmware reason, or the failure narrative of a failed check.
    pub value: String,
    /// `Pass`, `Fail`, or `-`.
    pub result: String,
}

/// Flattened report for table renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    /// Tier label, e.g. `32 MHz`.
    pub speed: String,
    /// Spec conformity rows in schema order.
    pub rows: Vec<ReportRow>,
    /// Electrical readings.
    pub electrical: Vec<ElectricalReading>,
    /// Transmission rows.
    pub transmission: Vec<TransmissionRow>,
    /// Failure narratives for the failure panel.
    pub failure_details: Vec<String>,
    /// Whether the failure panel should be shown.
    pub has_failures: bool,
}
