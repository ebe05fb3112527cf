//! Configuration for the review relay and its backends

use serde::{Deserialize, Serialize};

/// Per-backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig
{   /// API key, when the backend requires one
    pub api_key: Option<String>
  , /// API base URL override (if custom)
    pub api_base: Option<String>
}

/// Local model server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OllamaConfig
{   /// Server base URL (default http://localhost:11434)
    pub base_url: Option<String>
  , /// Model name (default codellama)
    pub model: Option<String>
}

/// Review relay configuration
///
/// One explicit struct passed at construction time; adapters
/// never read the environment themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewerConfig
{   /// Selected provider identifier (default: openai)
    pub provider: Option<String>
  , pub openai: BackendConfig
  , pub deepseek: BackendConfig
  , pub grok: BackendConfig
  , pub anthropic: BackendConfig
  , pub gemini: BackendConfig
  , pub ollama: OllamaConfig
}

impl ReviewerConfig
{   /// Load configuration from process environment variables
    ///
    /// This is the only place the crate touches the environment.
    pub fn from_env() -> Self
    {   let var = |name: &str| std::env::var(name).ok();
        ReviewerConfig
        {   provider: var("AI_PROVIDER")
          , openai: BackendConfig
            {   api_key: var("OPENAI_API_KEY")
              , api_base: None
            }
          , deepseek: BackendConfig
            {   api_key: var("DEEPSEEK_API_KEY")
              , api_base: None
            }
          , grok: BackendConfig
            {   api_key: var("GROK_API_KEY")
              , api_base: None
            }
          , anthropic: BackendConfig
            {   api_key: var("ANTHROPIC_API_KEY")
              , api_base: None
            }
          , gemini: BackendConfig
            {   api_key: var("GEMINI_API_KEY")
              , api_base: None
            }
          , ollama: OllamaConfig
            {   base_url: var("OLLAMA_BASE_URL")
              , model: var("OLLAMA_MODEL")
            }
        }
    }
}
