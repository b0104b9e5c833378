//! Accumulated wizard answers
//!
//! Form data is kept as one JSON object per step key. Slices stay in place
//! when a step drops out of the visible sequence; only the visible steps are
//! read when the payload is assembled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The record a user submits for one step
pub type StepData = Map<String, Value>;

/// Step-keyed answers collected so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    slices: BTreeMap<String, StepData>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stored slice for a step
    pub fn slice(&self, step: &str) -> Option<&StepData> {
        self.slices.get(step)
    }

    /// Store a step's record, replacing whatever was there before
    pub fn insert(&mut self, step: impl Into<String>, data: StepData) {
        self.slices.insert(step.into(), data);
    }

    /// Get a field value, treating `null` as absent
    pub fn field(&self, step: &str, field: &str) -> Option<&Value> {
        self.slice(step)
            .and_then(|slice| slice.get(field))
            .filter(|value| !value.is_null())
    }

    /// Get a string field
    pub fn text(&self, step: &str, field: &str) -> Option<&str> {
        self.field(step, field).and_then(Value::as_str)
    }

    /// True only when the field holds a literal `true`
    pub fn flag(&self, step: &str, field: &str) -> bool {
        matches!(self.field(step, field), Some(Value::Bool(true)))
    }

    /// Step keys with stored data, in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }

    /// Check whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Check whether a value counts as "not answered"
///
/// Missing fields, `null`, and whitespace-only strings are all treated alike.
pub fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

/// Drop unanswered fields from a record, recursing into lists of records
///
/// Strings are trimmed, matching what the schema validated.
pub fn prune(data: &StepData) -> StepData {
    data.iter()
        .filter(|(_, value)| !is_absent(Some(value)))
        .map(|(name, value)| (name.clone(), prune_value(value)))
        .collect()
}

fn prune_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(prune(map)),
        Value::Array(items) => Value::Array(items.iter().map(prune_value).collect()),
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other.clone(),
    }
}
