//! coderev - a single-purpose relay that sends source code to one
//! of several LLM HTTP APIs with a fixed review prompt and returns
//! the model's textual response.
//!
//! One normalized request shape goes in, one adapter per backend
//! translates it onto that backend's wire format, and the handler
//! converts any adapter failure into displayable text so callers
//! never branch on backend identity.

pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod handler;
pub mod reviewer;

use serde::{Deserialize, Serialize};

/// Provider identifier used when the configuration names none
pub const DEFAULT_PROVIDER: &str = "openai";

/// Enum representing all supported LLM providers.
/// Each variant corresponds to one public API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Hash)]
pub enum Provider
{   /// OpenAI (chat completions)
    OpenAi
  , /// DeepSeek (OpenAI-compatible chat completions)
    DeepSeek
  , /// xAI Grok (OpenAI-compatible chat completions)
    Grok
  , /// Anthropic (Claude messages API)
    Anthropic
  , /// Local/self-hosted model server (Ollama)
    Ollama
  , /// Google generative API (model discovery at startup)
    Gemini
}

/// The closed set of supported providers, in listing order
pub const ALL_PROVIDERS: [Provider; 6] =
[   Provider::OpenAi
  , Provider::DeepSeek
  , Provider::Grok
  , Provider::Anthropic
  , Provider::Ollama
  , Provider::Gemini
];

impl Provider
{   /// Parse a provider identifier, case-insensitively
    pub fn parse(id: &str) -> Result<Self, crate::error::Error>
    {   match id.to_lowercase().as_str()
        {   "openai" => Ok(Provider::OpenAi)
          , "deepseek" => Ok(Provider::DeepSeek)
          , "grok" => Ok(Provider::Grok)
          , "anthropic" => Ok(Provider::Anthropic)
          , "ollama" => Ok(Provider::Ollama)
          , "gemini" => Ok(Provider::Gemini)
          , _ => Err(crate::error::Error::UnsupportedProvider(
              id.to_string()
            ))
        }
    }

    /// Stable lowercase identifier
    pub fn id(&self) -> &'static str
    {   match self
        {   Provider::OpenAi => "openai"
          , Provider::DeepSeek => "deepseek"
          , Provider::Grok => "grok"
          , Provider::Anthropic => "anthropic"
          , Provider::Ollama => "ollama"
          , Provider::Gemini => "gemini"
        }
    }

    /// Human-readable name for capability listings
    pub fn display_name(&self) -> &'static str
    {   match self
        {   Provider::OpenAi => "OpenAI GPT"
          , Provider::DeepSeek => "DeepSeek"
          , Provider::Grok => "Grok (xAI)"
          , Provider::Anthropic => "Anthropic Claude"
          , Provider::Ollama => "Ollama Local"
          , Provider::Gemini => "Google Gemini"
        }
    }

    /// Whether the configuration carries this provider's
    /// required credential
    pub fn is_configured(
      &self
    , config: &crate::config::ReviewerConfig
    ) -> bool
    {   match self
        {   Provider::OpenAi => config.openai.api_key.is_some()
          , Provider::DeepSeek => config.deepseek.api_key.is_some()
          , Provider::Grok => config.grok.api_key.is_some()
          , Provider::Anthropic => config.anthropic.api_key.is_some()
          , Provider::Ollama => config.ollama.base_url.is_some()
          , Provider::Gemini => config.gemini.api_key.is_some()
        }
    }
}

/// One row of the capability listing
///
/// Informational only; routing is decided by the handler's
/// configuration, not by this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor
{   pub id: String
  , pub display_name: String
  , pub enabled: bool
}

/// Enumerate the known providers and whether each appears
/// configured (credential present)
pub fn list_providers(
  config: &crate::config::ReviewerConfig
) -> Vec<ProviderDescriptor>
{   ALL_PROVIDERS
      .iter()
      .map(|provider| ProviderDescriptor
        {   id: provider.id().to_string()
          , display_name: provider.display_name().to_string()
          , enabled: provider.is_configured(config)
        })
      .collect()
}

pub use config::ReviewerConfig;
pub use error::Error;
pub use handler::UniversalHandler;
pub use request::{GenerationOutcome, GenerationRequest};
pub use reviewer::{CodeReviewer, ReviewReport};
