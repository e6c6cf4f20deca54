//! LLM gateway: one completion call against the configured provider, or the
//! deterministic offline fallback when no credential is set.

use crate::config::Settings;
use crate::provider::mock::offline_completion;
use crate::provider::{CompletionRequest, MockProvider, ProviderError, ProviderKind, ProviderRegistry};
use crate::types::*;
use tracing::debug;

pub struct Llm {
    settings: Settings,
    registry: ProviderRegistry,
}

impl Llm {
    /// Gateway over the built-in providers.
    pub fn new(settings: Settings) -> Self {
        Self::with_registry(settings, ProviderRegistry::default())
    }

    pub fn with_registry(settings: Settings, registry: ProviderRegistry) -> Self {
        Self { settings, registry }
    }

    /// Gateway that answers from a script instead of the network.
    /// Used by tests and demos that need specific model output.
    pub fn scripted(provider: MockProvider) -> Self {
        let mut registry = ProviderRegistry::new();
        registry.register(ProviderKind::Mock, provider);
        let settings = Settings::new("mock", "scripted").with_api_key("mock");
        Self { settings, registry }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Complete `prompt` with an optional system instruction.
    ///
    /// In mock mode this never touches the network.
    pub async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: CompletionOptions,
    ) -> Result<CompletionResult, ProviderError> {
        if self.settings.mock_mode() {
            return Ok(offline_completion(prompt, system));
        }
        let api_key = self.settings.api_key.clone().unwrap_or_default();

        let provider = self.registry.resolve(&self.settings.llm_provider)?;
        debug!(
            "completion: provider={} model={} max_tokens={}",
            self.settings.llm_provider, self.settings.model, options.max_tokens
        );

        provider
            .complete(CompletionRequest {
                model: self.settings.model.clone(),
                system_prompt: system.map(String::from),
                prompt: prompt.to_string(),
                api_key,
                base_url: self.settings.base_url.clone(),
                temperature: options.temperature,
                max_tokens: options.max_tokens,
                timeout: self.settings.request_timeout,
            })
            .await
    }
}
