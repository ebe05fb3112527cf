use serde::{Deserialize, Serialize};
use async_trait::async_trait;
use log::{debug, trace, error};
use std::time::Duration;

const OLLAMA_DEFAULT_BASE: &str = "http://localhost:11434";
const OLLAMA_DEFAULT_MODEL: &str = "codellama";

// Local inference is slower than the hosted APIs
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaOptions
{   pub temperature: f32
  , pub num_predict: usize
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub stream: bool
  , pub options: OllamaOptions
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaChatResponse
{   pub message: ChatMessage
}

// ===== Adapter =====

/// Adapter for a local model server; no credentials, so
/// construction cannot fail
pub struct OllamaClient
{   base_url: String
  , model: String
  , http_client: reqwest::Client
}

impl OllamaClient
{   pub fn new(config: &crate::config::ReviewerConfig) -> Self
    {   debug!("Creating Ollama client");
        OllamaClient
        {   base_url: config.ollama.base_url.clone()
              .unwrap_or_else(|| OLLAMA_DEFAULT_BASE.to_string())
          , model: config.ollama.model.clone()
              .unwrap_or_else(|| OLLAMA_DEFAULT_MODEL.to_string())
          , http_client: reqwest::Client::new()
        }
    }
}

#[async_trait]
impl super::ProviderAdapter for OllamaClient
{   async fn generate(
      &self
    , request: &crate::request::GenerationRequest
    ) -> Result<String, crate::error::Error>
    {   debug!("Dispatching chat request to Ollama");

        let payload = OllamaChatRequest
        {   model: self.model.clone()
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
          , stream: false
          , options: OllamaOptions
            {   temperature: request.temperature
              , num_predict: request.max_tokens
            }
        };

        trace!("Ollama request: {:?}", payload);

        let response = self.http_client
          .post(format!("{}/api/chat", self.base_url))
          .timeout(REQUEST_TIMEOUT)
          .json(&payload)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::from_transport(e)
          })?;

        let status = response.status();
        trace!("Ollama response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Ollama API error {}: {}", status, body);
            return Err(crate::error::Error::Upstream
            {   status: status.as_u16()
              , body
            });
        }

        let chat_response: OllamaChatResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::Parse(e.to_string())
          })?;

        Ok(chat_response.message.content)
    }

    fn name(&self) -> String
    {   format!("Ollama ({})", self.model)
    }
}
