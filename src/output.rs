//! Serializable command output: the analysis report and the error envelope.

use serde::{Deserialize, Serialize};

use crate::display::{format_number, parse_float};
use crate::error::ErrorPayload;
use crate::metrics::{
    calculate_best_practices_percentage, calculate_performance_with, calculate_seo, clamp_percent,
    PerformanceModel,
};
use crate::shaper::ShapedPage;
use crate::types::KeyValueEntry;

pub const SEOLENS_OUTPUT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SeoOutput {
    Analyze(AnalysisReport),
    Error(ErrorOutput),
}

/// One score card: a title, the scorer's string and the bar width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub title: String,
    /// Score exactly as the scorer formatted it
    pub value: String,
    /// Bar width in percent, always within [0, 100]
    pub percent: f64,
}

impl ScoreCard {
    pub fn new(title: impl Into<String>, value: String) -> Self {
        let percent = clamp_percent(parse_float(&value));
        Self {
            title: title.into(),
            value,
            percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub on_page: ScoreCard,
    pub seo: ScoreCard,
    pub performance: ScoreCard,
    pub best_practices: ScoreCard,
}

impl Scorecard {
    pub fn from_shaped(page: &ShapedPage, model: &PerformanceModel) -> Self {
        let on_page = page.onpage_score.unwrap_or(f64::NAN);
        Self {
            on_page: ScoreCard::new("On page score", format_number(on_page)),
            seo: ScoreCard::new("SEO", calculate_seo(&page.checks_map)),
            performance: ScoreCard::new(
                "Performance",
                calculate_performance_with(&page.timing, model),
            ),
            best_practices: ScoreCard::new(
                "Best Practices",
                calculate_best_practices_percentage(&page.checks_map),
            ),
        }
    }

    /// Cards in display order.
    pub fn cards(&self) -> [&ScoreCard; 4] {
        [
            &self.on_page,
            &self.seo,
            &self.performance,
            &self.best_practices,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub version: String,
    /// URL the user asked to analyse
    pub url: String,
    /// URL the API reports for the analysed page, if it differs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    pub scores: Scorecard,
    pub on_page_results: Vec<KeyValueEntry>,
    pub checks: Vec<KeyValueEntry>,
}

impl AnalysisReport {
    pub fn from_shaped(url: impl Into<String>, page: ShapedPage, model: &PerformanceModel) -> Self {
        let url = url.into();
        let scores = Scorecard::from_shaped(&page, model);
        let page_url = page.url.filter(|u| u != &url);
        Self {
            version: SEOLENS_OUTPUT_VERSION.to_string(),
            url,
            page_url,
            scores,
            on_page_results: page.on_page_results,
            checks: page.checks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

impl ErrorOutput {
    pub fn new(error: ErrorPayload) -> Self {
        Self {
            version: SEOLENS_OUTPUT_VERSION.to_string(),
            message: Some(error.message.clone()),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChecksMap, EntryValue, TimingMetrics};

    fn shaped(onpage_score: Option<f64>, timing: TimingMetrics) -> ShapedPage {
        let mut checks_map = ChecksMap::new();
        checks_map.insert("is_https".into(), true);
        checks_map.insert("low_content_rate".into(), true);
        checks_map.insert("seo_friendly_url_dynamic_check".into(), true);
        ShapedPage {
            url: Some("https://example.com/".into()),
            onpage_score,
            on_page_results: vec![KeyValueEntry::new("images_count", EntryValue::Number(4.0))],
            checks: vec![KeyValueEntry::new("is_https", EntryValue::Flag(true))],
            checks_map,
            timing,
        }
    }

    #[test]
    fn builds_four_cards_in_order() {
        let page = shaped(Some(88.46), TimingMetrics::default());
        let report =
            AnalysisReport::from_shaped("https://example.com/", page, &PerformanceModel::default());

        let titles: Vec<_> = report
            .scores
            .cards()
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["On page score", "SEO", "Performance", "Best Practices"]
        );
        assert_eq!(report.scores.on_page.value, "88.46");
        assert_eq!(report.scores.seo.value, "20");
        assert_eq!(report.scores.performance.value, "100.00");
        assert_eq!(report.scores.best_practices.value, "50.00");
        assert!(report.page_url.is_none(), "same URL should not repeat");
    }

    #[test]
    fn bar_width_is_clamped_even_when_value_is_not() {
        let slow = TimingMetrics {
            time_to_interactive: 20000.0,
            largest_contentful_paint: 20000.0,
            first_input_delay: 4000.0,
            duration_time: 40000.0,
        };
        let cards = Scorecard::from_shaped(&shaped(None, slow), &PerformanceModel::default());
        assert_eq!(cards.performance.value, "-300.00");
        assert_eq!(cards.performance.percent, 0.0);
        assert_eq!(cards.on_page.value, "NaN");
        assert_eq!(cards.on_page.percent, 0.0);
    }

    #[test]
    fn output_is_tagged_by_mode() {
        let page = shaped(Some(90.0), TimingMetrics::default());
        let report =
            AnalysisReport::from_shaped("https://example.com", page, &PerformanceModel::default());
        let json = serde_json::to_value(SeoOutput::Analyze(report)).unwrap();
        assert_eq!(json["mode"], "analyze");
        assert_eq!(json["scores"]["seo"]["value"], "20");
        assert_eq!(json["pageUrl"], "https://example.com/");
        assert_eq!(json["onPageResults"][0]["key"], "images_count");
    }
}
