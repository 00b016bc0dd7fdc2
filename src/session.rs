//! Lifecycle of a single analysis: idle, loading, then loaded or failed.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::{ErrorPayload, Result, SeoError};
use crate::output::{AnalysisReport, ErrorOutput, SeoOutput};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        url: String,
    },
    Loaded(Box<AnalysisReport>),
    Failed(ErrorPayload),
}

/// Holds the state of the current analysis. Starting a new one always
/// discards the previous result; concurrent requests are not de-duplicated.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    state: LoadState,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading { .. })
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.state {
            LoadState::Loaded(report) => Some(report.as_ref()),
            _ => None,
        }
    }

    /// Clear previous data and enter `Loading`. A blank URL leaves the
    /// session idle and returns `false`.
    pub fn begin(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            self.state = LoadState::Idle;
            return false;
        }
        debug!(url, "analysis started");
        self.state = LoadState::Loading {
            url: url.to_string(),
        };
        true
    }

    pub fn complete(&mut self, report: AnalysisReport) {
        debug!(url = %report.url, "analysis loaded");
        self.state = LoadState::Loaded(Box::new(report));
    }

    pub fn fail(&mut self, error: &SeoError) {
        warn!(error = %error, "analysis failed");
        self.state = LoadState::Failed(error.to_payload());
    }

    /// Drive one analysis: `begin`, await `load`, then `complete` or `fail`.
    /// Returns `false` without calling `load` when the URL is blank.
    pub async fn run<F, Fut>(&mut self, url: &str, load: F) -> bool
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<AnalysisReport>>,
    {
        if !self.begin(url) {
            return false;
        }
        let url = url.trim().to_string();
        match load(url).await {
            Ok(report) => self.complete(report),
            Err(err) => self.fail(&err),
        }
        true
    }

    /// Final output for a finished session; `None` while idle or loading.
    pub fn into_output(self) -> Option<SeoOutput> {
        match self.state {
            LoadState::Loaded(report) => Some(SeoOutput::Analyze(*report)),
            LoadState::Failed(error) => Some(SeoOutput::Error(ErrorOutput::new(error))),
            LoadState::Idle | LoadState::Loading { .. } => None,
        }
    }
}
