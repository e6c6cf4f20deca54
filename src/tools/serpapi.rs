//! Web search via SerpAPI (Google engine).

use crate::types::{truncate_chars, WebResult};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("SerpAPI request failed: HTTP {status} {body}")]
    RequestFailed { status: u16, body: String },
    #[error("SerpAPI network error: {0}")]
    Network(String),
    #[error("SerpAPI returned an unreadable body: {0}")]
    InvalidResponse(String),
}

/// Search client. One GET per call; no pagination, retry, or caching.
#[derive(Debug, Clone)]
pub struct WebSearch {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for WebSearch {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(20),
        }
    }
}

impl WebSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Top `num_results` organic results for `query`, in rank order.
    pub async fn search(
        &self,
        query: &str,
        api_key: &str,
        num_results: usize,
    ) -> Result<Vec<WebResult>, SearchError> {
        let url = format!("{}/search.json", self.base_url.trim_end_matches('/'));
        debug!("SerpAPI search: q={:?} num={}", query, num_results);

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let num = num_results.to_string();
        let response = client
            .get(&url)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", api_key),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(SearchError::RequestFailed {
                status: status.as_u16(),
                body: truncate_chars(&body, 200).to_string(),
            });
        }

        parse_results(&body, num_results)
    }
}

/// Search with the default client.
pub async fn search_web(
    query: &str,
    api_key: &str,
    num_results: usize,
) -> Result<Vec<WebResult>, SearchError> {
    WebSearch::default().search(query, api_key, num_results).await
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
}

/// Fields are loose JSON so one odd result cannot sink the whole response.
#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    link: Option<Value>,
    #[serde(default)]
    snippet: Option<Value>,
}

fn string_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn parse_results(body: &str, num_results: usize) -> Result<Vec<WebResult>, SearchError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
    Ok(parsed
        .organic_results
        .unwrap_or_default()
        .into_iter()
        .take(num_results)
        .map(|r| WebResult {
            title: string_field(r.title).unwrap_or_default(),
            link: string_field(r.link).unwrap_or_default(),
            snippet: string_field(r.snippet),
        })
        .collect())
}
