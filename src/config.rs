use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::metrics::PerformanceModel;

pub const DEFAULT_ENDPOINT: &str = "https://api.dataforseo.com/v3/on_page/instant_pages";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSettings,
    pub request: RequestOptions,
    pub timeouts: Timeouts,
    pub performance: PerformanceModel,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub endpoint: String,
    pub login: Option<String>,
    pub password: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            login: None,
            password: None,
        }
    }
}

/// Per-page options sent with each analysis task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub load_resources: bool,
    pub enable_javascript: bool,
    pub enable_browser_rendering: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            load_resources: true,
            enable_javascript: true,
            enable_browser_rendering: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub connect: Duration,
    #[serde(with = "humantime_serde")]
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimal places for on-page result values
    pub decimal_places: u32,
    /// Width of the score bars, in cells
    pub bar_width: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            bar_width: 20,
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&raw)?)
    }

    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.api.endpoint)
            .map_err(|e| format!("api.endpoint '{}' is not a URL: {}", self.api.endpoint, e))?;

        if self.timeouts.request.is_zero() {
            return Err("timeouts.request must be greater than zero".to_string());
        }

        let w = &self.performance.weights;
        for (name, value) in [
            ("time_to_interactive", w.time_to_interactive),
            ("largest_contentful_paint", w.largest_contentful_paint),
            ("first_input_delay", w.first_input_delay),
            ("duration_time", w.duration_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "performance.weights.{name} must be a non-negative number"
                ));
            }
        }
        if w.sum() <= 0.0 {
            return Err("performance.weights must not all be zero".to_string());
        }

        let b = &self.performance.budgets;
        for (name, value) in [
            ("time_to_interactive", b.time_to_interactive),
            ("largest_contentful_paint", b.largest_contentful_paint),
            ("first_input_delay", b.first_input_delay),
            ("duration_time", b.duration_time),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("performance.budgets.{name} must be positive"));
            }
        }

        if self.display.decimal_places > 10 {
            return Err("display.decimal_places must be at most 10".to_string());
        }
        if self.display.bar_width == 0 {
            return Err("display.bar_width must be greater than zero".to_string());
        }
        Ok(())
    }
}
