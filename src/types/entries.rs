//! Scorer inputs and display entries.
//!
//! These are the already-typed values the scorers work on, plus the
//! key/value unit of the two flat result lists:
//! - [`ChecksMap`] - boolean check flags keyed by check name
//! - [`TimingMetrics`] - page timing measurements in milliseconds
//! - [`KeyValueEntry`] - one row of the on-page results or checks list

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::display::{convert_to_title_case, format_number, round_to_decimal_places};

/// Check name -> whether the page satisfies it.
pub type ChecksMap = HashMap<String, bool>;

/// Page-load timings, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimingMetrics {
    pub time_to_interactive: f64,
    pub largest_contentful_paint: f64,
    pub first_input_delay: f64,
    pub duration_time: f64,
}

// ============================================================================
// Display entries
// ============================================================================

/// Value of a [`KeyValueEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Flag(bool),
    Number(f64),
    Text(String),
    /// Arrays and objects are carried through untouched.
    Other(Value),
}

impl EntryValue {
    /// Convert a JSON value; `null` has no entry.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(EntryValue::Flag(*b)),
            Value::Number(n) => n
                .as_f64()
                .map(EntryValue::Number)
                .or_else(|| Some(EntryValue::Other(value.clone()))),
            Value::String(s) => Some(EntryValue::Text(s.clone())),
            other => Some(EntryValue::Other(other.clone())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EntryValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// String form fed to the numeric normalizer before display.
    pub fn to_display_string(&self) -> String {
        match self {
            EntryValue::Flag(b) => b.to_string(),
            EntryValue::Number(n) => format_number(*n),
            EntryValue::Text(s) => s.clone(),
            EntryValue::Other(v) => v.to_string(),
        }
    }
}

/// One row of a flat display list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValueEntry {
    pub key: String,
    pub value: EntryValue,
}

impl KeyValueEntry {
    pub fn new(key: impl Into<String>, value: EntryValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Human readable key ("images_count" -> "Images Count").
    pub fn title(&self) -> String {
        convert_to_title_case(&self.key)
    }

    /// Value as shown in an on-page result card: rounded to
    /// `decimal_places`, trailing zeros dropped, `NaN` for non-numbers.
    pub fn rounded_value(&self, decimal_places: u32) -> String {
        format_number(round_to_decimal_places(
            &self.value.to_display_string(),
            decimal_places,
        ))
    }
}
