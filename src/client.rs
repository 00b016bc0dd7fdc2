use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::config::{Config, RequestOptions};
use crate::error::{Result, SeoError};
use crate::types::InstantPagesResponse;

/// Longest API error body kept in an error message.
const ERROR_BODY_LIMIT: usize = 300;

/// HTTP Basic credentials for the analysis API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

/// Body of one analysis task; the API takes an array of these.
#[derive(Debug, Serialize)]
struct TaskRequest<'a> {
    url: &'a str,
    load_resources: bool,
    enable_javascript: bool,
    enable_browser_rendering: bool,
}

/// Client for the "instant pages" on-page analysis endpoint.
#[derive(Debug, Clone)]
pub struct InstantPagesClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: Option<Credentials>,
    options: RequestOptions,
}

impl InstantPagesClient {
    pub fn from_config(config: &Config, credentials: Option<Credentials>) -> Result<Self> {
        let http = build_http_client(config.timeouts.connect, config.timeouts.request)?;
        Self::with_http_client(http, &config.api.endpoint, credentials, config.request)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        endpoint: &str,
        credentials: Option<Credentials>,
        options: RequestOptions,
    ) -> Result<Self> {
        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
            credentials,
            options,
        })
    }

    /// Submit `target` for analysis and decode the raw response.
    pub async fn fetch(&self, target: &str) -> Result<InstantPagesResponse> {
        let target = validate_target_url(target)?;
        let body = [TaskRequest {
            url: target.as_str(),
            load_resources: self.options.load_resources,
            enable_javascript: self.options.enable_javascript,
            enable_browser_rendering: self.options.enable_browser_rendering,
        }];

        info!(page = %target, endpoint = %self.endpoint, "requesting page analysis");
        let mut request = self.http.post(self.endpoint.clone()).json(&body);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.login, Some(&creds.password));
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%status, "analysis API responded");
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SeoError::api(Some(status), truncate(&text, ERROR_BODY_LIMIT)));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn build_http_client(connect: Duration, request: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .connect_timeout(connect)
        .timeout(request)
        .user_agent(concat!("seolens/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Parse a user-supplied page URL; only absolute http(s) URLs are accepted.
pub fn validate_target_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SeoError::Config(format!(
            "unsupported URL scheme '{other}': ensure 'https://' is in the input URL"
        ))),
    }
}

fn truncate(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
