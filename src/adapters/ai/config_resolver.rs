//! Config-backed provider resolver.
//!
//! Resolves completion providers per interview owner. Today every owner
//! maps to the single configured OpenAI key; the per-owner cache means a
//! real multi-tenant key store is an adapter change, not a core change.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::AiConfig;
use crate::domain::foundation::{DomainError, ErrorCode, OwnerId};
use crate::ports::{CompletionProvider, ProviderResolver};

use super::{OpenAIConfig, OpenAIProvider};

/// Resolver that builds one provider per owner from `AiConfig`.
pub struct ConfigProviderResolver {
    config: AiConfig,
    cache: RwLock<HashMap<OwnerId, Arc<dyn CompletionProvider>>>,
}

impl ConfigProviderResolver {
    /// Creates a resolver over the application's AI configuration.
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn build_provider(&self) -> Result<Arc<dyn CompletionProvider>, DomainError> {
        let api_key = self.config.openai_api_key.clone().ok_or_else(|| {
            DomainError::new(
                ErrorCode::CompletionProviderError,
                "No completion API key configured",
            )
        })?;

        let provider_config = OpenAIConfig::new(api_key)
            .with_model(self.config.model.clone())
            .with_timeout(self.config.timeout());

        Ok(Arc::new(OpenAIProvider::new(provider_config)))
    }
}

#[async_trait]
impl ProviderResolver for ConfigProviderResolver {
    async fn resolve(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Arc<dyn CompletionProvider>, DomainError> {
        if let Some(provider) = self.cache.read().unwrap().get(owner_id) {
            return Ok(provider.clone());
        }

        let provider = self.build_provider()?;
        self.cache
            .write()
            .unwrap()
            .insert(owner_id.clone(), provider.clone());
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> AiConfig {
        AiConfig {
            openai_api_key: key.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn resolves_provider_when_key_configured() {
        let resolver = ConfigProviderResolver::new(config_with_key(Some("sk-test")));
        let owner = OwnerId::new("op-1").unwrap();

        let provider = resolver.resolve(&owner).await.unwrap();
        assert_eq!(provider.provider_info().name, "openai");
    }

    #[tokio::test]
    async fn missing_key_is_provider_error() {
        let resolver = ConfigProviderResolver::new(config_with_key(None));
        let owner = OwnerId::new("op-1").unwrap();

        let result = resolver.resolve(&owner).await;
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().code,
            ErrorCode::CompletionProviderError
        );
    }

    #[tokio::test]
    async fn providers_are_cached_per_owner() {
        let resolver = ConfigProviderResolver::new(config_with_key(Some("sk-test")));
        let owner = OwnerId::new("op-1").unwrap();

        let first = resolver.resolve(&owner).await.unwrap();
        let second = resolver.resolve(&owner).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
