//! Cohere v2 Chat API provider.

use super::traits::*;
use crate::types::*;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.com";

pub struct CohereProvider;

#[async_trait]
impl CompletionProvider for CohereProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        let base_url = request
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let url = format!("{}/v2/chat", base_url);

        let body = serde_json::json!({
            "model": request.model,
            "messages": chat_messages(&request),
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        debug!("Cohere request: model={} url={}", request.model, url);

        let response = http_client(request.timeout)?
            .post(&url)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", request.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(error_for_status(status, &text));
        }

        let parsed: CohereChatResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let first = parsed
            .message
            .content
            .into_iter()
            .find_map(|c| c.text)
            .ok_or_else(|| ProviderError::InvalidResponse("no text content in response".into()))?;

        Ok(CompletionResult {
            text: first,
            model: format!("cohere:{}", request.model),
            used_mock: false,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CohereChatResponse {
    message: CohereMessage,
}

#[derive(Debug, Deserialize)]
struct CohereMessage {
    #[serde(default)]
    content: Vec<CohereContent>,
}

#[derive(Debug, Deserialize)]
struct CohereContent {
    #[serde(default)]
    text: Option<String>,
}
