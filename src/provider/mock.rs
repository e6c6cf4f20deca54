//! Mock providers. No real API calls.
//!
//! [`offline_completion`] is the deterministic fallback the gateway uses in
//! mock mode. [`MockProvider`] replays scripted responses for tests.

use super::traits::*;
use crate::types::*;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Deterministic placeholder for when no credential is configured.
///
/// The same prompt always yields the same text. The prompt is echoed on a
/// single line so list markers in it never look like model output.
pub fn offline_completion(prompt: &str, system: Option<&str>) -> CompletionResult {
    let mut text = String::from("[mock] No LLM credential configured; this is a mock response.");
    if let Some(system) = system.filter(|s| !s.is_empty()) {
        text.push_str(&format!("\n[mock] System: {}", truncate_chars(&one_line(system), 80)));
    }
    text.push_str(&format!("\n[mock] Prompt: {}", truncate_chars(&one_line(prompt), 200)));
    CompletionResult {
        text,
        model: "mock".into(),
        used_mock: true,
    }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A scripted response: text, or a provider failure
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error(String),
}

/// Mock LLM provider for tests. Supply a sequence of responses.
///
/// Once the script runs out, the last response repeats. Clones share the
/// script and the request log, so a test can keep a handle after giving the
/// provider to a gateway.
#[derive(Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    responses: VecDeque<MockResponse>,
    last: Option<MockResponse>,
    requests: Vec<CompletionRequest>,
}

impl MockProvider {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                responses: responses.into(),
                ..Default::default()
            })),
        }
    }

    /// Convenience: provider that always returns the same text
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![MockResponse::Text(text.into())])
    }

    /// Convenience: sequence of text responses
    pub fn texts(texts: Vec<impl Into<String>>) -> Self {
        Self::new(
            texts
                .into_iter()
                .map(|t| MockResponse::Text(t.into()))
                .collect(),
        )
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state
            .lock()
            .map(|s| s.requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        let response = {
            let mut state = self
                .state
                .lock()
                .map_err(|_| ProviderError::InvalidResponse("mock script poisoned".into()))?;
            state.requests.push(request);
            match state.responses.pop_front() {
                Some(next) => {
                    state.last = Some(next.clone());
                    next
                }
                None => state
                    .last
                    .clone()
                    .unwrap_or_else(|| MockResponse::Text("(no more mock responses)".into())),
            }
        };

        match response {
            MockResponse::Text(text) => Ok(CompletionResult {
                text,
                model: "mock".into(),
                used_mock: true,
            }),
            MockResponse::Error(message) => Err(ProviderError::Network(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_completion_is_deterministic() {
        let a = offline_completion("Hello", Some("sys"));
        let b = offline_completion("Hello", Some("sys"));
        assert_eq!(a, b);
        assert!(a.used_mock);
        assert_eq!(a.model, "mock");
        assert!(a.text.to_lowercase().contains("mock"));
        assert!(a.text.contains("Hello"));
    }
}
