//! AI adapters - completion provider implementations.

mod config_resolver;
mod mock_provider;
mod openai_provider;

pub use config_resolver::ConfigProviderResolver;
pub use mock_provider::{MockCompletionProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
