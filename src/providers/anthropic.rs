use serde::{Deserialize, Serialize};
use async_trait::async_trait;
use log::{debug, trace, error};
use std::time::Duration;

const ANTHROPIC_API_BASE: &str
  = "https://api.anthropic.com/v1";
const ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMessage
{   pub role: String
  , pub content: String
}

/// The system message travels as a top-level field here,
/// not as a message-list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest
{   pub model: String
  , pub max_tokens: usize
  , pub temperature: f32
  , pub system: String
  , pub messages: Vec<UserMessage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse
{   pub content: Vec<ContentBlock>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock
{   pub text: String
}

// ===== Adapter =====

/// Anthropic messages adapter
pub struct AnthropicClient
{   api_base: String
  , api_key: String
  , http_client: reqwest::Client
}

impl AnthropicClient
{   pub fn new(
      config: &crate::config::ReviewerConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating Anthropic client");
        let api_key = config.anthropic.api_key.clone()
          .ok_or_else(|| {
            error!("No API key configured for Anthropic");
            crate::error::Error::MissingApiKey(
              "Anthropic Claude".to_string()
            )
          })?;

        Ok(AnthropicClient
        {   api_base: config.anthropic.api_base.clone()
              .unwrap_or_else(|| ANTHROPIC_API_BASE.to_string())
          , api_key
          , http_client: reqwest::Client::new()
        })
    }
}

#[async_trait]
impl super::ProviderAdapter for AnthropicClient
{   async fn generate(
      &self
    , request: &crate::request::GenerationRequest
    ) -> Result<String, crate::error::Error>
    {   debug!("Dispatching messages request to Anthropic");

        let payload = MessagesRequest
        {   model: ANTHROPIC_MODEL.to_string()
          , max_tokens: request.max_tokens
          , temperature: request.temperature
          , system: request.system_message.clone()
          , messages: vec![
              UserMessage
              {   role: "user".to_string()
                , content: request.prompt.clone()
              }
            ]
        };

        trace!("Anthropic request: {:?}", payload);

        let response = self.http_client
          .post(format!("{}/messages", self.api_base))
          .timeout(REQUEST_TIMEOUT)
          .header("x-api-key", &self.api_key)
          .header("anthropic-version", ANTHROPIC_VERSION)
          .header("Content-Type", "application/json")
          .json(&payload)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::from_transport(e)
          })?;

        let status = response.status();
        trace!("Anthropic response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!(
              "Anthropic API error {}: {}",
              status, body
            );
            return Err(crate::error::Error::Upstream
            {   status: status.as_u16()
              , body
            });
        }

        let messages_response: MessagesResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::Parse(e.to_string())
          })?;

        messages_response.content.first()
          .map(|block| block.text.clone())
          .ok_or_else(|| {
            error!("No content blocks in response");
            crate::error::Error::EmptyResponse
          })
    }

    fn name(&self) -> String
    {   "Anthropic Claude".to_string()
    }
}
