// crates/dcp-conformity-core/src/core/record.rs
// ============================================================================
// Module: Validation Record
// Description: Input boundary produced by the DCP bench firmware.
// Purpose: Decode untrusted validation output into typed, lossy-but-safe sections.
// Dependencies: serde, serde_json (raw_value), crate::core::measurement
// ============================================================================

//! ## Overview
//! A validation record has four optional sections: electrical readings,
//! transmission checks, per-parameter measurements, and free-text failure
//! details. Decoding never rejects a record for a malformed entry inside a
//! section; the entry is dropped and the remaining data is still evaluated.
//!
//! Transmission checks come from the firmware's error taxonomy. A failed check
//! contributes one upstream failure narrative to the conformity report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use serde_json::Map;
use serde_json::Value;
use serde_json::value::RawValue;

use crate::core::measurement::MeasurementSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Key carrying the frame type code.
const TRANSMISSION_TYPE_KEY: &str = "Transmission Type";
/// Legacy key carrying the frame type code.
const LEGACY_TYPE_KEY: &str = "Type";
/// Checks in the order the report lists them; other names follow alphabetically.
const CANONICAL_CHECK_ORDER: [&str; 5] = ["Sync", "BitSync", "Size", "L3", "Generic"];

// ============================================================================
// SECTION: Transmission Faults
// ============================================================================

/// Firmware transmission error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmissionFault {
    /// Sync line never released.
    SyncInfinite,
    /// Sync burst longer than allowed.
    SyncTooLong,
    /// Sync burst shorter than allowed.
    SyncTooShort,
    /// Bit-sync line never released.
    BitSyncInfinite,
    /// Bit-sync longer than allowed.
    BitSyncTooLong,
    /// Bit-sync shorter than allowed.
    BitSyncTooShort,
    /// Bit-sync low half out of range.
    BitSyncInvalidLow,
    /// Frame length does not match the protocol.
    InvalidSize,
    /// No frame observed within the capture window.
    NoTransmission,
    /// Generic frame failed validation.
    InvalidGenericMessage,
    /// L3 frame failed header, source id, padding or CRC validation.
    InvalidL3Message,
    /// Validator-side failure.
    Internal,
}

impl TransmissionFault {
    /// Every fault code.
    pub const ALL: [Self; 12] = [
        Self::SyncInfinite,
        Self::SyncTooLong,
        Self::SyncTooShort,
        Self::BitSyncInfinite,
        Self::BitSyncTooLong,
        Self::BitSyncTooShort,
        Self::BitSyncInvalidLow,
        Self::InvalidSize,
        Self::NoTransmission,
        Self::InvalidGenericMessage,
        Self::InvalidL3Message,
        Self::Internal,
    ];

    /// Human-readable description, worded as the firmware reports it.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SyncInfinite => "Infinite sync signal",
            Self::SyncTooLong => "Sync signal too long",
            Self::SyncTooShort => "Sync signal too short",
            Self::BitSyncInfinite => "Infinite bitsync signal",
            Self::BitSyncTooLong => "BitSync signal too long",
            Self::BitSyncTooShort => "BitSync signal too short",
            Self::BitSyncInvalidLow => "BitSync signal with invalid low",
            Self::InvalidSize => "Invalid transmission size",
            Self::NoTransmission => "No transmission detected",
            Self::InvalidGenericMessage => "Invalid generic message",
            Self::InvalidL3Message => "Invalid L3 message",
            Self::Internal => "Internal validator error",
        }
    }

    /// Maps a firmware reason string back to its fault code.
    #[must_use]
    pub fn from_description(reason: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fault| fault.description() == reason)
    }
}

impl fmt::Display for TransmissionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ============================================================================
// SECTION: Transmission Info
// ============================================================================

/// Frame family observed on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    /// Layer-3 framed message (type code 0).
    L3,
    /// Generic message (any other type code).
    Generic,
}

impl FrameType {
    /// Decodes the firmware type code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        if code == 0 { Self::L3 } else { Self::Generic }
    }

    /// Encodes the firmware type code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::L3 => 0,
            Self::Generic => 1,
        }
    }

    /// Display label, also the name of the matching frame check.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::L3 => "L3",
            Self::Generic => "Generic",
        }
    }
}

/// One pass/fail transmission check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransmissionCheck {
    /// True when the check passed.
    pub status: bool,
    /// Firmware-supplied explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Typed fault code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<TransmissionFault>,
}

impl TransmissionCheck {
    /// A passing check.
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            status: true,
            reason: None,
            fault: None,
        }
    }

    /// A failing check with a fault code.
    #[must_use]
    pub const fn failed(fault: TransmissionFault) -> Self {
        Self {
            status: false,
            reason: None,
            fault: Some(fault),
        }
    }

    /// Attaches a free-text reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Resolves the fault code, falling back to matching the reason text.
    #[must_use]
    pub fn resolved_fault(&self) -> Option<TransmissionFault> {
        self.fault.or_else(|| self.reason.as_deref().and_then(TransmissionFault::from_description))
    }

    /// Failure narrative for a failed check named `name`.
    #[must_use]
    pub fn narrative(&self, name: &str) -> String {
        if let Some(reason) = self.reason.as_deref().filter(|reason| !reason.trim().is_empty()) {
            return reason.to_string();
        }
        match self.fault {
            Some(fault) => fault.description().to_string(),
            None => format!("{name} check failed"),
        }
    }

    /// Decodes a check object; `None` when `status` is not a boolean.
    fn from_json(object: &Map<String, Value>) -> Option<Self> {
        let status = object.get("status")?.as_bool()?;
        let reason = object.get("reason").and_then(Value::as_str).map(str::to_string);
        let fault = object
            .get("fault")
            .and_then(|value| TransmissionFault::deserialize(value).ok());
        Some(Self {
            status,
            reason,
            fault,
        })
    }
}

/// Transmission section of a validation record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransmissionInfo {
    /// Observed frame family.
    pub frame_type: Option<FrameType>,
    /// Checks keyed by name.
    checks: BTreeMap<String, TransmissionCheck>,
}

impl TransmissionInfo {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style frame type.
    #[must_use]
    pub const fn with_frame_type(mut self, frame_type: FrameType) -> Self {
        self.frame_type = Some(frame_type);
        self
    }

    /// Builder-style check insert.
    #[must_use]
    pub fn with_check(mut self, name: impl Into<String>, check: TransmissionCheck) -> Self {
        self.checks.insert(name.into(), check);
        self
    }

    /// Looks up a check by name.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&TransmissionCheck> {
        self.checks.get(name)
    }

    /// Returns checks in canonical order: Sync, BitSync, Size, L3, Generic,
    /// then any other name alphabetically.
    #[must_use]
    pub fn ordered_checks(&self) -> Vec<(&str, &TransmissionCheck)> {
        let mut ordered: Vec<(&str, &TransmissionCheck)> = CANONICAL_CHECK_ORDER
            .iter()
            .filter_map(|name| self.checks.get_key_value(*name))
            .map(|(name, check)| (name.as_str(), check))
            .collect();
        ordered.extend(
            self.checks
                .iter()
                .filter(|(name, _)| !CANONICAL_CHECK_ORDER.contains(&name.as_str()))
                .map(|(name, check)| (name.as_str(), check)),
        );
        ordered
    }

    /// Narratives for every failed check, in canonical order.
    #[must_use]
    pub fn failure_narratives(&self) -> Vec<String> {
        self.ordered_checks()
            .into_iter()
            .filter(|(_, check)| !check.status)
            .map(|(name, check)| check.narrative(name))
            .collect()
    }

    /// Builds the section from a loose JSON object.
    #[must_use]
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        let frame_type = map
            .get(TRANSMISSION_TYPE_KEY)
            .or_else(|| map.get(LEGACY_TYPE_KEY))
            .and_then(Value::as_i64)
            .map(FrameType::from_code);
        let checks = map
            .iter()
            .filter(|(name, _)| name.as_str() != TRANSMISSION_TYPE_KEY && name.as_str() != LEGACY_TYPE_KEY)
            .filter_map(|(name, value)| {
                let check = TransmissionCheck::from_json(value.as_object()?)?;
                Some((name.clone(), check))
            })
            .collect();
        Self {
            frame_type,
            checks,
        }
    }
}

impl<'de> Deserialize<'de> for TransmissionInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw.as_object().map(Self::from_json_map).unwrap_or_default())
    }
}

impl Serialize for TransmissionInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ordered = self.ordered_checks();
        let mut map = serializer.serialize_map(Some(ordered.len() + 1))?;
        if let Some(frame_type) = self.frame_type {
            map.serialize_entry(TRANSMISSION_TYPE_KEY, &frame_type.code())?;
        }
        for (name, check) in ordered {
            map.serialize_entry(name, check)?;
        }
        map.end()
    }
}

// ============================================================================
// SECTION: Electrical Info
// ============================================================================

/// One electrical reading passed through to the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalReading {
    /// Reading name (e.g. `VIH`).
    pub name: String,
    /// Reading value in the firmware's unit.
    pub value: f64,
}

/// Decodes the electrical mapping, keeping only numeric readings.
///
/// Each entry is parsed on its own so an out-of-range number drops only that reading.
fn deserialize_electrical<'de, D>(deserializer: D) -> Result<Vec<ElectricalReading>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Box<RawValue>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, raw)| {
            let value = serde_json::from_str::<Value>(raw.get()).ok()?.as_f64()?;
            Some(ElectricalReading {
                name,
                value,
            })
        })
        .collect())
}

/// Encodes electrical readings back into a name-to-value mapping.
fn serialize_electrical<S>(readings: &[ElectricalReading], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(readings.iter().map(|reading| (&reading.name, reading.value)))
}

/// Decodes failure details, treating `null` as empty and skipping non-strings.
fn deserialize_failure_details<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect())
}

// ============================================================================
// SECTION: Validation Record
// ============================================================================

/// Full output of one bench validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRecord {
    /// Electrical readings, passed through unchanged.
    #[serde(
        default,
        deserialize_with = "deserialize_electrical",
        serialize_with = "serialize_electrical"
    )]
    pub electrical_info: Vec<ElectricalReading>,
    /// Transmission-layer checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission_info: Option<TransmissionInfo>,
    /// Per-parameter measurements.
    #[serde(default)]
    pub spec_conformity: MeasurementSet,
    /// Free-text failures found outside per-parameter comparison.
    #[serde(default, deserialize_with = "deserialize_failure_details")]
    pub failure_details: Vec<String>,
}

impl ValidationRecord {
    /// Upstream failure narratives: failure details in order, then failed
    /// transmission checks in canonical order.
    #[must_use]
    pub fn upstream_failures(&self) -> Vec<String> {
        let mut narratives = self.failure_details.clone();
        if let Some(transmission) = &self.transmission_info {
            narratives.extend(transmission.failure_narratives());
        }
        narratives
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
