// crates/dcp-conformity-core/src/core/measurement.rs
// ============================================================================
// Module: Measurement Set
// Description: Untrusted measured values keyed by parameter display name.
// Purpose: Accept a loose JSON mapping without letting one bad value sink the record.
// Dependencies: serde, serde_json (raw_value), crate::core::values
// ============================================================================

//! ## Overview
//! A measurement set is the `specConformity` mapping of a validation record.
//! It is untrusted input: values that are neither a number nor a boolean are
//! dropped and remembered as malformed, so the affected parameter evaluates as
//! missing evidence while every other parameter is still judged.
//!
//! Entries are tokenized one at a time, so a number outside the `f64` range
//! (e.g. `1e400`) marks only its own name as malformed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value;
use serde_json::value::RawValue;

use crate::core::values::ParameterValue;

// ============================================================================
// SECTION: Measurement Set
// ============================================================================

/// Measured values keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementSet {
    /// Usable values.
    values: BTreeMap<String, ParameterValue>,
    /// Names whose value could not be interpreted.
    malformed: Vec<String>,
}

impl MeasurementSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a measurement.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the measured value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.values.get(name).copied()
    }

    /// Iterates usable measurement names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Names that were present but carried an unusable value.
    #[must_use]
    pub fn malformed(&self) -> &[String] {
        &self.malformed
    }

    /// Number of usable measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no usable measurement is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a set from loose JSON values.
    #[must_use]
    pub fn from_json_map(map: BTreeMap<String, Value>) -> Self {
        let mut set = Self::new();
        for (name, value) in map {
            set.accept(name, value);
        }
        set
    }

    /// Builds a set from untokenized JSON values, one parse per entry.
    fn from_raw_map(map: BTreeMap<String, Box<RawValue>>) -> Self {
        let mut set = Self::new();
        for (name, raw) in map {
            match serde_json::from_str::<Value>(raw.get()) {
                Ok(value) => set.accept(name, value),
                Err(_) => set.malformed.push(name),
            }
        }
        set
    }

    /// Keeps numbers and booleans; records anything else as malformed.
    fn accept(&mut self, name: String, value: Value) {
        match value {
            Value::Bool(flag) => self.insert(name, flag),
            Value::Number(number) => match number.as_f64() {
                Some(number) => self.insert(name, number),
                None => self.malformed.push(name),
            },
            Value::Null | Value::String(_) | Value::Array(_) | Value::Object(_) => {
                self.malformed.push(name);
            }
        }
    }
}

impl<K: Into<String>, V: Into<ParameterValue>> FromIterator<(K, V)> for MeasurementSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

// ============================================================================
// SECTION: Serde
// ============================================================================

impl<'de> Deserialize<'de> for MeasurementSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, Box<RawValue>>>::deserialize(deserializer)?;
        Ok(raw.map(Self::from_raw_map).unwrap_or_default())
    }
}

impl Serialize for MeasurementSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(&self.values)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
