//! Wire types of the on-page "instant pages" analysis API.
//!
//! Only the fields the shaper and scorers read are modelled; everything
//! else in the response is ignored on deserialization. Most fields are
//! optional because the API omits or nulls them on failed tasks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::entries::TimingMetrics;

/// Status code the API uses for a successful envelope or task.
pub const API_STATUS_OK: u32 = 20000;

/// Top-level response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstantPagesResponse {
    #[serde(default)]
    pub status_code: Option<u32>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
}

/// One submitted analysis task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub status_code: Option<u32>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub result: Option<Vec<TaskResult>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub items: Option<Vec<PageItem>>,
}

/// Analysis of a single page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageItem {
    #[serde(default)]
    pub url: Option<String>,
    /// Overall on-page score computed by the API (0-100)
    #[serde(default)]
    pub onpage_score: Option<f64>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub page_timing: Option<PageTiming>,
    /// Check name -> flag, in payload order
    #[serde(default)]
    pub checks: Option<Map<String, Value>>,
}

/// Page metadata: content metrics plus link/resource counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMeta {
    /// Content metrics (readability indexes, text rates...), in payload order
    #[serde(default)]
    pub content: Option<Map<String, Value>>,
    #[serde(default)]
    pub internal_links_count: Option<Value>,
    #[serde(default)]
    pub external_links_count: Option<Value>,
    #[serde(default)]
    pub inbound_links_count: Option<Value>,
    #[serde(default)]
    pub images_count: Option<Value>,
    #[serde(default)]
    pub images_size: Option<Value>,
    #[serde(default)]
    pub scripts_count: Option<Value>,
    #[serde(default)]
    pub scripts_size: Option<Value>,
    #[serde(default)]
    pub stylesheets_count: Option<Value>,
    #[serde(default)]
    pub stylesheets_size: Option<Value>,
}

impl PageMeta {
    /// Named counters appended after the content metrics, in display order.
    pub fn counters(&self) -> [(&'static str, Option<&Value>); 9] {
        [
            ("internal_links_count", self.internal_links_count.as_ref()),
            ("external_links_count", self.external_links_count.as_ref()),
            ("inbound_links_count", self.inbound_links_count.as_ref()),
            ("images_count", self.images_count.as_ref()),
            ("images_size", self.images_size.as_ref()),
            ("scripts_count", self.scripts_count.as_ref()),
            ("scripts_size", self.scripts_size.as_ref()),
            ("stylesheets_count", self.stylesheets_count.as_ref()),
            ("stylesheets_size", self.stylesheets_size.as_ref()),
        ]
    }
}

/// Page timing block, milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTiming {
    #[serde(default)]
    pub time_to_interactive: Option<f64>,
    #[serde(default)]
    pub largest_contentful_paint: Option<f64>,
    #[serde(default)]
    pub first_input_delay: Option<f64>,
    #[serde(default)]
    pub duration_time: Option<f64>,
}

impl PageTiming {
    /// Missing timings become `NaN`, never 0 ms.
    pub fn to_metrics(&self) -> TimingMetrics {
        TimingMetrics {
            time_to_interactive: self.time_to_interactive.unwrap_or(f64::NAN),
            largest_contentful_paint: self.largest_contentful_paint.unwrap_or(f64::NAN),
            first_input_delay: self.first_input_delay.unwrap_or(f64::NAN),
            duration_time: self.duration_time.unwrap_or(f64::NAN),
        }
    }
}
