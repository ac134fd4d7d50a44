//! Provider resolver port.
//!
//! Completion credentials are scoped per interview owner, resolved at
//! session-start time and cached for the session's lifetime. This keeps
//! owner configuration out of global mutable state: a multi-tenant
//! deployment swaps the adapter, not the core.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, OwnerId};

use super::CompletionProvider;

/// Resolves the completion provider configured for an interview owner.
#[async_trait]
pub trait ProviderResolver: Send + Sync {
    /// Returns the provider to use for the given owner.
    ///
    /// # Errors
    ///
    /// - `CompletionProviderError` if the owner has no usable
    ///   completion configuration
    async fn resolve(&self, owner_id: &OwnerId) -> Result<Arc<dyn CompletionProvider>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn provider_resolver_is_object_safe() {
        fn _accepts_dyn(_resolver: &dyn ProviderResolver) {}
    }
}
