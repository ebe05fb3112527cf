//! LLM provider adapter implementations

pub mod openai;
pub mod anthropic;
pub mod ollama;
pub mod gemini;

// Re-export for convenience
pub use openai::OpenAiStyleClient;
pub use anthropic::AnthropicClient;
pub use ollama::OllamaClient;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use log::debug;

/// Normalized contract every backend adapter implements
///
/// Adapters translate a generic request into their backend's
/// wire format and extract the generic text result back out;
/// callers never branch on backend identity.
#[async_trait]
pub trait ProviderAdapter: Send + Sync
{   /// Issue one generation call against the backend
    async fn generate(
      &self
    , request: &crate::request::GenerationRequest
    ) -> Result<String, crate::error::Error>;

    /// Stable human-readable backend identifier
    fn name(&self) -> String;
}

/// Construct the adapter for a provider identifier
///
/// Case-insensitive lookup over the closed set; construction is
/// not memoized, so the discovery adapter repeats its model
/// resolution on every call.
pub async fn create_adapter(
  id: &str
, config: &crate::config::ReviewerConfig
) -> Result<Box<dyn ProviderAdapter>, crate::error::Error>
{   debug!("Creating adapter for provider: {}", id);
    match crate::Provider::parse(id)?
    {   crate::Provider::OpenAi => {
          Ok(Box::new(OpenAiStyleClient::openai(config)?))
        }
      , crate::Provider::DeepSeek => {
          Ok(Box::new(OpenAiStyleClient::deepseek(config)?))
        }
      , crate::Provider::Grok => {
          Ok(Box::new(OpenAiStyleClient::grok(config)?))
        }
      , crate::Provider::Anthropic => {
          Ok(Box::new(AnthropicClient::new(config)?))
        }
      , crate::Provider::Ollama => {
          Ok(Box::new(OllamaClient::new(config)))
        }
      , crate::Provider::Gemini => {
          Ok(Box::new(GeminiClient::new(config).await?))
        }
    }
}
