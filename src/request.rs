//! Unified request and outcome types for the review relay

use serde::{Deserialize, Serialize};

/// Unified generation request
///
/// Immutable per call; adapters translate it into their
/// backend's native wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// The user prompt text
    pub prompt: String
  , /// System instructions
    pub system_message: String
  , /// Max tokens to generate
    pub max_tokens: usize
  , /// Temperature for sampling, in [0, 1]
    pub temperature: f32
}

impl GenerationRequest
{   /// Create a request with the default limits
    /// (2000 tokens, temperature 0.3)
    pub fn new(
      prompt: impl Into<String>
    , system_message: impl Into<String>
    ) -> Self
    {   GenerationRequest
        {   prompt: prompt.into()
          , system_message: system_message.into()
          , max_tokens: 2000
          , temperature: 0.3
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self
    {   self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self
    {   self.temperature = temperature;
        self
    }
}

/// Outcome of one generation call through the handler
///
/// The handler never propagates adapter failures; it returns
/// this value so callers can still tell a usable completion
/// from a failure description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome
{   /// Backend returned a completion
    Completed
    {   text: String
    }
  , /// Adapter failed; carries the provider name for display
    Failed
    {   provider: String
      , error: crate::error::Error
    }
}

impl GenerationOutcome
{   pub fn is_failure(&self) -> bool
    {   matches!(self, GenerationOutcome::Failed { .. })
    }

    /// Render the outcome as display text
    ///
    /// Failures become an annotated message rather than an
    /// error, preserving the always-return-text contract.
    pub fn into_text(self) -> String
    {   match self
        {   GenerationOutcome::Completed { text } => text
          , GenerationOutcome::Failed { provider, error } => {
              format!("Error from {}: {}", provider, error)
            }
        }
    }
}
