//! Provider registry: maps a provider identifier to a CompletionProvider.

use super::traits::*;
use std::collections::HashMap;

/// Which LLM backend a provider identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Cohere,
    OpenAi,
    /// Scripted provider, only registered by tests
    Mock,
}

impl ProviderKind {
    /// Parse a lowercased provider identifier. Unknown identifiers give `None`.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "cohere" => Some(Self::Cohere),
            "openai" => Some(Self::OpenAi),
            "mock" => Some(Self::Mock),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cohere => write!(f, "cohere"),
            Self::OpenAi => write!(f, "openai"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Registry of available completion providers, keyed by kind.
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Box<dyn CompletionProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider for a given kind.
    pub fn register(&mut self, kind: ProviderKind, provider: impl CompletionProvider + 'static) {
        self.providers.insert(kind, Box::new(provider));
    }

    /// Check if a kind is registered.
    pub fn has(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Resolve a provider identifier, failing for unknown or unregistered ones.
    pub fn resolve(&self, id: &str) -> Result<&dyn CompletionProvider, ProviderError> {
        ProviderKind::parse(id)
            .and_then(|kind| self.providers.get(&kind))
            .map(|p| p.as_ref())
            .ok_or_else(|| ProviderError::UnsupportedProvider(id.to_string()))
    }
}

impl Default for ProviderRegistry {
    /// Create a registry with all built-in providers registered.
    fn default() -> Self {
        use crate::provider::{CohereProvider, OpenAiCompatProvider};

        let mut registry = Self::new();
        registry.register(ProviderKind::Cohere, CohereProvider);
        registry.register(ProviderKind::OpenAi, OpenAiCompatProvider);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_builtin_providers() {
        let registry = ProviderRegistry::default();
        assert!(registry.has(ProviderKind::Cohere));
        assert!(registry.has(ProviderKind::OpenAi));
        assert!(!registry.has(ProviderKind::Mock));
    }

    #[test]
    fn test_resolve_unknown_provider() {
        let registry = ProviderRegistry::default();
        assert!(registry.resolve("cohere").is_ok());
        match registry.resolve("anthropic") {
            Err(ProviderError::UnsupportedProvider(id)) => assert_eq!(id, "anthropic"),
            _ => panic!("expected UnsupportedProvider"),
        }
        // known kind, but not registered
        assert!(registry.resolve("mock").is_err());
    }
}
