use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum SeoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Analysis API error (status: {status:?}): {message}")]
    Api {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Unexpected payload shape: {0}")]
    Payload(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SeoError {
    pub fn api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        SeoError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        SeoError::Payload(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            SeoError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            SeoError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Some error occurred. Ensure 'https://' is in the input URL, check connectivity and retry.",
            ),
            SeoError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Ensure 'https://' is in the input URL (e.g., https://example.com/blog).",
            ),
            SeoError::Api { status, message } => ErrorPayload::new(
                ErrorCategory::Api,
                format!("Analysis API error (status {:?}): {}", status, message),
                "Check DATAFORSEO_LOGIN/DATAFORSEO_PASSWORD and account limits; ensure 'https://' is in the input URL.",
            ),
            SeoError::Payload(msg) => ErrorPayload::new(
                ErrorCategory::Payload,
                msg.to_string(),
                "The analysis response was incomplete; retry or inspect it with --verbose.",
            ),
            SeoError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Payload,
                e.to_string(),
                "Check JSON inputs (e.g., --payload); run with --verbose for details.",
            ),
            SeoError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check flags/paths (e.g., --url https://example.com) and credentials.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeoError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Api,
    Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
