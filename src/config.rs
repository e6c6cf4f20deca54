//! Environment-derived settings.
//!
//! Settings are built once at startup and handed to every component by
//! reference. A missing provider credential is not an error: it switches the
//! LLM gateway into mock mode so every step stays runnable offline.

use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_COHERE_MODEL: &str = "command-r-plus-08-2024";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini";

/// Load a `.env` file into the process environment.
///
/// With no path, `./.env` is used if it exists. A missing file is not an error.
pub fn load_env(env_path: Option<&Path>) {
    let path = env_path.unwrap_or_else(|| Path::new(".env"));
    if !path.exists() {
        return;
    }
    if let Err(e) = dotenvy::from_path(path) {
        debug!("ignoring unreadable env file {}: {}", path.display(), e);
    }
}

/// Immutable process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Lowercased provider identifier: `cohere`, `openai`, or anything else
    pub llm_provider: String,
    /// Credential for the active provider
    pub api_key: Option<String>,
    pub model: String,
    /// Override for the provider's API root (tests, proxies)
    pub base_url: Option<String>,
    pub serpapi_api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn new(llm_provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            llm_provider: llm_provider.into().trim().to_lowercase(),
            api_key: None,
            model: model.into(),
            base_url: None,
            serpapi_api_key: None,
            request_timeout: Duration::from_secs(60),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_serpapi_api_key(mut self, key: impl Into<String>) -> Self {
        self.serpapi_api_key = Some(key.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cohere_key = get("COHERE_API_KEY").or_else(|| get("CO_API_KEY"));
        let openai_key = get("OPENAI_API_KEY");

        let provider = get("LLM_PROVIDER")
            .map(|p| p.to_lowercase())
            .unwrap_or_else(|| {
                if cohere_key.is_some() {
                    "cohere".into()
                } else if openai_key.is_some() {
                    "openai".into()
                } else {
                    "missing".into()
                }
            });

        let (api_key, model) = match provider.as_str() {
            "cohere" => (
                cohere_key,
                get("COHERE_MODEL").unwrap_or_else(|| DEFAULT_COHERE_MODEL.into()),
            ),
            "openai" => (
                openai_key,
                get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            ),
            _ => (
                get("LLM_API_KEY"),
                get("LLM_MODEL").unwrap_or_else(|| "unknown".into()),
            ),
        };

        Self {
            llm_provider: provider,
            api_key,
            model,
            base_url: get("LLM_BASE_URL"),
            serpapi_api_key: get("SERPAPI_API_KEY"),
            request_timeout: Duration::from_secs(60),
        }
    }

    /// True when the active provider has no credential.
    pub fn mock_mode(&self) -> bool {
        self.api_key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_is_mock_mode() {
        let s = Settings::from_lookup(lookup(&[]));
        assert_eq!(s.llm_provider, "missing");
        assert!(s.mock_mode());
        assert!(s.serpapi_api_key.is_none());
    }

    #[test]
    fn test_cohere_inferred_from_key() {
        let s = Settings::from_lookup(lookup(&[("CO_API_KEY", "abc")]));
        assert_eq!(s.llm_provider, "cohere");
        assert_eq!(s.api_key.as_deref(), Some("abc"));
        assert_eq!(s.model, DEFAULT_COHERE_MODEL);
        assert!(!s.mock_mode());
    }

    #[test]
    fn test_cohere_api_key_preferred_over_co_api_key() {
        let s = Settings::from_lookup(lookup(&[("COHERE_API_KEY", "one"), ("CO_API_KEY", "two")]));
        assert_eq!(s.api_key.as_deref(), Some("one"));
    }

    #[test]
    fn test_explicit_provider_without_its_key_is_mock() {
        let s = Settings::from_lookup(lookup(&[
            ("LLM_PROVIDER", " OpenAI "),
            ("COHERE_API_KEY", "abc"),
        ]));
        assert_eq!(s.llm_provider, "openai");
        assert_eq!(s.model, DEFAULT_OPENAI_MODEL);
        assert!(s.mock_mode());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let s = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "  "), ("SERPAPI_API_KEY", "")]));
        assert_eq!(s.llm_provider, "missing");
        assert!(s.serpapi_api_key.is_none());
    }

    #[test]
    fn test_unknown_provider_uses_generic_key() {
        let s = Settings::from_lookup(lookup(&[
            ("LLM_PROVIDER", "mystery"),
            ("LLM_API_KEY", "k"),
            ("LLM_MODEL", "m1"),
            ("SERPAPI_API_KEY", "serp"),
        ]));
        assert_eq!(s.llm_provider, "mystery");
        assert_eq!(s.model, "m1");
        assert!(!s.mock_mode());
        assert_eq!(s.serpapi_api_key.as_deref(), Some("serp"));
    }
}
