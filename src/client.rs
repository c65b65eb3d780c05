//! HTTP client for the remote summarisation service.
//!
//! Uses reqwest for the JSON POST and maps every failure onto a
//! user-displayable [`SummarizeError`].

use crate::config::ServiceConfig;
use crate::summary::{HealthResponse, SummarizeRequest, SummarizeResponse};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("abridge/", env!("CARGO_PKG_VERSION"));

/// Shown when neither the service nor the transport explain the failure
pub const FALLBACK_MESSAGE: &str = "Failed to generate summary. Try a shorter text.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    /// A response arrived but carried no usable summary.
    #[error("Invalid response format")]
    InvalidResponse,
    /// Network failure, timeout, or non-2xx status.
    #[error("{}", transport_message(.detail, .message))]
    Transport {
        /// `detail` from the service's error body
        detail: Option<String>,
        /// Generic description of the failure
        message: Option<String>,
    },
}

impl SummarizeError {
    pub fn timeout() -> Self {
        SummarizeError::Transport {
            detail: None,
            message: None,
        }
    }
}

fn transport_message<'a>(detail: &'a Option<String>, message: &'a Option<String>) -> &'a str {
    detail
        .as_deref()
        .or(message.as_deref())
        .unwrap_or(FALLBACK_MESSAGE)
}

#[async_trait]
pub trait SummaryService: Send + Sync {
    /// Summarise already-validated text.
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// [`SummaryService`] backed by `POST <base_url>/summarize`.
#[derive(Debug, Clone)]
pub struct HttpSummaryService {
    client: Client,
    base_url: Url,
    endpoint: Url,
}

impl HttpSummaryService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|e| ClientBuildError::Url(e.to_string()))?;
        let endpoint = base_url
            .join("summarize")
            .map_err(|e| ClientBuildError::Url(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Query the service root and return its status message.
    pub async fn health(&self) -> Result<String, SummarizeError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_slice::<HealthResponse>(&body)
            .map(|health| health.message)
            .map_err(|_| SummarizeError::InvalidResponse)
    }
}

#[async_trait]
impl SummaryService for HttpSummaryService {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        info!(
            "POST {} ({} characters)",
            self.endpoint,
            text.chars().count()
        );

        // Content-Type: application/json is set by `.json()`
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SummarizeRequest { text })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!("service answered {} with {} bytes", status, body.len());

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: SummarizeResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("unparseable summary body: {}", e);
                return Err(SummarizeError::InvalidResponse);
            }
        };
        if let Some(len) = parsed.original_text_length {
            debug!("service received {} characters", len);
        }

        parsed.into_summary().ok_or(SummarizeError::InvalidResponse)
    }
}

#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid service URL: {0}")]
    Url(String),
}

fn transport_error(err: reqwest::Error) -> SummarizeError {
    if err.is_timeout() {
        warn!("request timed out");
        return SummarizeError::timeout();
    }
    warn!("request failed: {}", err);
    SummarizeError::Transport {
        detail: None,
        message: Some(format!("Network Error: {}", root_cause(&err))),
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> SummarizeError {
    let detail = extract_detail(body);
    warn!("service returned {} (detail: {:?})", status, detail);
    SummarizeError::Transport {
        detail,
        message: Some(format!(
            "Request failed with status code {}",
            status.as_u16()
        )),
    }
}

fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut source = err;
    while let Some(next) = source.source() {
        source = next;
    }
    source.to_string()
}

/// Pull a human-readable `detail` out of an error body.
///
/// Accepts a plain string or a list of validation entries carrying `msg`.
pub(crate) fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
