use crate::types::*;
use async_trait::async_trait;
use std::time::Duration;

/// Configuration for a single completion call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub api_key: String,
    /// Provider API root; `None` means the provider's public endpoint
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// The core provider trait. Implement this for each LLM backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one chat completion and return the first text choice.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResult, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unknown LLM provider: {0:?}. Use 'cohere' or 'openai'.")]
    UnsupportedProvider(String),
    #[error("API error: HTTP {status} {message}")]
    Api { status: u16, message: String },
    #[error("Auth error: {0}")]
    Auth(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Map a non-success HTTP response to a `ProviderError`, keeping at most
/// 200 characters of the body.
pub(crate) fn error_for_status(status: reqwest::StatusCode, body: &str) -> ProviderError {
    let message = truncate_chars(body, 200).to_string();
    match status.as_u16() {
        401 | 403 => ProviderError::Auth(message),
        code => ProviderError::Api {
            status: code,
            message,
        },
    }
}

/// Build an HTTP client honoring the request timeout.
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}

/// Chat messages in the `{role, content}` shape shared by Cohere v2 and OpenAI.
pub(crate) fn chat_messages(request: &CompletionRequest) -> Vec<serde_json::Value> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system_prompt.as_deref().filter(|s| !s.is_empty()) {
        messages.push(serde_json::json!({"role": "system", "content": system}));
    }
    messages.push(serde_json::json!({"role": "user", "content": request.prompt}));
    messages
}
