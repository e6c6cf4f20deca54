//! OpenAI Chat Completions compatible provider.
//!
//! Covers OpenAI itself and any endpoint that speaks the same
//! non-streaming `/chat/completions` API (point `LLM_BASE_URL` at it).

use super::traits::*;
use crate::types::*;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiCompatProvider;

#[async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        let base_url = request
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let url = format!("{}/chat/completions", base_url);

        let body = serde_json::json!({
            "model": request.model,
            "messages": chat_messages(&request),
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        debug!("OpenAI compat request: model={} url={}", request.model, url);

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

        let parsed: OpenAiResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("no choices in response".into()))?;

        Ok(CompletionResult {
            text: content,
            model: format!("openai:{}", request.model),
            used_mock: false,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}
