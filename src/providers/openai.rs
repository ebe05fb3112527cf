use serde::{Deserialize, Serialize};
use async_trait::async_trait;
use log::{debug, trace, error};
use std::time::Duration;

const OPENAI_API_BASE: &str
  = "https://api.openai.com/v1";
const DEEPSEEK_API_BASE: &str
  = "https://api.deepseek.com/v1";
const GROK_API_BASE: &str
  = "https://api.x.ai/v1";

const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEEPSEEK_MODEL: &str = "deepseek-chat";
const GROK_MODEL: &str = "grok-beta";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage
{   #[serde(default)]
    pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
  , pub finish_reason: Option<String>
}

// ===== Adapter =====

/// Chat-completions adapter for every backend speaking the
/// OpenAI wire shape (OpenAI, DeepSeek, Grok)
///
/// The three profiles differ only in endpoint, model id and
/// display name; request and response envelopes are identical.
pub struct OpenAiStyleClient
{   display_name: &'static str
  , api_base: String
  , model: &'static str
  , api_key: String
  , http_client: reqwest::Client
}

impl OpenAiStyleClient
{   pub fn openai(
      config: &crate::config::ReviewerConfig
    ) -> Result<Self, crate::error::Error>
    {   Self::with_profile(
          "OpenAI GPT"
        , OPENAI_API_BASE
        , OPENAI_MODEL
        , &config.openai
        )
    }

    pub fn deepseek(
      config: &crate::config::ReviewerConfig
    ) -> Result<Self, crate::error::Error>
    {   Self::with_profile(
          "DeepSeek"
        , DEEPSEEK_API_BASE
        , DEEPSEEK_MODEL
        , &config.deepseek
        )
    }

    pub fn grok(
      config: &crate::config::ReviewerConfig
    ) -> Result<Self, crate::error::Error>
    {   Self::with_profile(
          "Grok (xAI)"
        , GROK_API_BASE
        , GROK_MODEL
        , &config.grok
        )
    }

    /// Credentials are validated here, never at call time
    fn with_profile(
      display_name: &'static str
    , default_base: &str
    , model: &'static str
    , backend: &crate::config::BackendConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating {} client", display_name);
        let api_key = backend.api_key.clone()
          .ok_or_else(|| {
            error!("No API key configured for {}", display_name);
            crate::error::Error::MissingApiKey(
              display_name.to_string()
            )
          })?;

        Ok(OpenAiStyleClient
        {   display_name
          , api_base: backend.api_base.clone()
              .unwrap_or_else(|| default_base.to_string())
          , model
          , api_key
          , http_client: reqwest::Client::new()
        })
    }
}

#[async_trait]
impl super::ProviderAdapter for OpenAiStyleClient
{   async fn generate(
      &self
    , request: &crate::request::GenerationRequest
    ) -> Result<String, crate::error::Error>
    {   debug!(
          "Dispatching chat completion to {}",
          self.display_name
        );

        let payload = ChatRequest
        {   model: self.model.to_string()
          , messages: vec![
              ChatMessage
              {   role: "system".to_string()
                , content: request.system_message.clone()
              }
            , ChatMessage
              {   role: "user".to_string()
                , content: request.prompt.clone()
              }
            ]
          , max_tokens: Some(request.max_tokens)
          , temperature: Some(request.temperature)
          , stream: Some(false)
        };

        trace!("{} request: {:?}", self.display_name, payload);

        let response = self.http_client
          .post(format!("{}/chat/completions", self.api_base))
          .timeout(REQUEST_TIMEOUT)
          .header("Authorization", format!("Bearer {}", self.api_key))
          .header("Content-Type", "application/json")
          .json(&payload)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::from_transport(e)
          })?;

        let status = response.status();
        trace!(
          "{} response status: {}",
          self.display_name, status
        );

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!(
              "{} API error {}: {}",
              self.display_name, status, body
            );
            return Err(crate::error::Error::Upstream
            {   status: status.as_u16()
              , body
            });
        }

        let chat_response: ChatResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::Parse(e.to_string())
          })?;

        chat_response.choices.first()
          .map(|c| c.message.content.clone())
          .ok_or_else(|| {
            error!("No choices in response");
            crate::error::Error::EmptyResponse
          })
    }

    fn name(&self) -> String
    {   self.display_name.to_string()
    }
}
