use serde::{Deserialize, Serialize};
use async_trait::async_trait;
use log::{debug, trace, error, info};
use std::time::Duration;

const GEMINI_API_BASE: &str
  = "https://generativelanguage.googleapis.com/v1beta";

/// Known-good model names, tried in order before anything the
/// listing happens to return
const PREFERRED_MODELS: [&str; 4] =
[   "gemini-pro"
  , "models/gemini-pro"
  , "gemini-1.0-pro"
  , "models/gemini-1.0-pro"
];

/// Used when the listing call fails or nothing matches;
/// generation may still fail later if the name is invalid
const FALLBACK_MODEL: &str = "gemini-pro";

const GENERATE_CONTENT_METHOD: &str = "generateContent";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

// ===== Wire Types =====

#[derive(Debug, Clone, Deserialize)]
pub struct ModelsResponse
{   #[serde(default)]
    pub models: Vec<ModelEntry>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry
{   pub name: String
  , #[serde(rename = "supportedGenerationMethods", default)]
    pub supported_generation_methods: Vec<String>
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest
{   pub contents: Vec<Content>
  , pub generation_config: GenerationConfig
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content
{   pub parts: Vec<Part>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part
{   pub text: String
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig
{   pub max_output_tokens: usize
  , pub temperature: f32
  , pub top_p: f32
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse
{   #[serde(default)]
    pub candidates: Vec<Candidate>
  , pub prompt_feedback: Option<PromptFeedback>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate
{   pub content: Option<Content>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback
{   pub block_reason: Option<String>
}

// ===== Model Resolver =====

/// Pick a usable model name from the declared list
///
/// Preference order strictly dominates listing order; listing
/// order only decides when no preferred name is present. Names
/// match exactly, so the bare forms in the preference list only
/// ever match a listing that declares them bare.
pub fn select_model(models: &[ModelEntry]) -> Option<String>
{   let supports_generate = |entry: &ModelEntry| {
      entry.supported_generation_methods
        .iter()
        .any(|method| method == GENERATE_CONTENT_METHOD)
    };

    for preferred in PREFERRED_MODELS
    {   if models.iter().any(|entry| {
          entry.name == preferred && supports_generate(entry)
        })
        {   debug!("Selected preferred model: {}", preferred);
            return Some(preferred.to_string());
        }
    }

    models.iter()
      .find(|entry| supports_generate(entry))
      .map(|entry| {
        debug!("Fallback to listed model: {}", entry.name);
        entry.name.clone()
      })
}

// ===== Adapter =====

/// Discovery-style adapter for the Google generative API
///
/// The model name is resolved once at construction and held for
/// the adapter's lifetime.
pub struct GeminiClient
{   api_base: String
  , api_key: String
  , model_name: String
  , http_client: reqwest::Client
}

impl GeminiClient
{   /// Create a client, resolving the model name up front
    ///
    /// A failed listing call does not abort construction; the
    /// fixed fallback name is used instead.
    pub async fn new(
      config: &crate::config::ReviewerConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating Gemini client");
        let api_key = config.gemini.api_key.clone()
          .ok_or_else(|| {
            error!("No API key configured for Gemini");
            crate::error::Error::MissingApiKey(
              "Google Gemini".to_string()
            )
          })?;
        let api_base = config.gemini.api_base.clone()
          .unwrap_or_else(|| GEMINI_API_BASE.to_string());

        let http_client = reqwest::Client::new();

        let model_name = match fetch_models(
          &http_client, &api_base, &api_key
        ).await
        {   Ok(models) => {
              debug!("Listed {} models", models.len());
              match select_model(&models)
              {   Some(name) => name
                , None => {
                    error!(
                      "No listed model supports {}",
                      GENERATE_CONTENT_METHOD
                    );
                    FALLBACK_MODEL.to_string()
                  }
              }
            }
          , Err(e) => {
              error!("Could not list models: {}", e);
              FALLBACK_MODEL.to_string()
            }
        };

        info!("Using Gemini model: {}", model_name);

        Ok(GeminiClient
        {   api_base
          , api_key
          , model_name
          , http_client
        })
    }

    pub fn model_name(&self) -> &str
    {   &self.model_name
    }

    fn model_path(&self) -> String
    {   if self.model_name.starts_with("models/")
        {   self.model_name.clone()
        } else
        {   format!("models/{}", self.model_name)
        }
    }
}

/// Fetch the backend's declared model list
async fn fetch_models(
  http_client: &reqwest::Client
, api_base: &str
, api_key: &str
) -> Result<Vec<ModelEntry>, crate::error::Error>
{   debug!("Fetching Gemini model list");

    let response = http_client
      .get(format!("{}/models", api_base))
      .timeout(REQUEST_TIMEOUT)
      .query(&[("key", api_key)])
      .send()
      .await
      .map_err(|e| {
        error!("Failed to fetch models: {}", e);
        crate::error::Error::from_transport(e)
      })?;

    let status = response.status();
    trace!("Models response status: {}", status);

    if !status.is_success()
    {   let body = response.text().await
          .unwrap_or_else(|_|
            "Unknown error".to_string()
          );
        error!("Failed to list models: {}", body);
        return Err(crate::error::Error::Upstream
        {   status: status.as_u16()
          , body
        });
    }

    let models_response: ModelsResponse
      = response.json().await.map_err(|e| {
        error!("Parse error: {}", e);
        crate::error::Error::Parse(e.to_string())
      })?;

    Ok(models_response.models)
}

#[async_trait]
impl super::ProviderAdapter for GeminiClient
{   async fn generate(
      &self
    , request: &crate::request::GenerationRequest
    ) -> Result<String, crate::error::Error>
    {   debug!(
          "Dispatching generateContent to {}",
          self.model_name
        );

        // No system role on this API; system instructions are
        // folded into the single prompt
        let full_prompt = format!(
          "{}\n\n{}",
          request.system_message, request.prompt
        );

        let payload = GenerateContentRequest
        {   contents: vec![
              Content
              {   parts: vec![
                    Part
                    {   text: full_prompt
                    }
                  ]
              }
            ]
          , generation_config: GenerationConfig
            {   max_output_tokens: request.max_tokens
              , temperature: request.temperature
              , top_p: 0.8
            }
        };

        trace!("Gemini request: {:?}", payload);

        let response = self.http_client
          .post(format!(
            "{}/{}:generateContent",
            self.api_base,
            self.model_path()
          ))
          .timeout(REQUEST_TIMEOUT)
          .query(&[("key", &self.api_key)])
          .json(&payload)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::from_transport(e)
          })?;

        let status = response.status();
        trace!("Gemini response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Gemini API error {}: {}", status, body);
            return Err(crate::error::Error::Upstream
            {   status: status.as_u16()
              , body
            });
        }

        let content_response: GenerateContentResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::Parse(e.to_string())
          })?;

        let parts = content_response.candidates.first()
          .and_then(|candidate| candidate.content.as_ref())
          .map(|content| content.parts.as_slice())
          .unwrap_or(&[]);

        if parts.is_empty()
        {   if let Some(reason) = content_response
              .prompt_feedback
              .as_ref()
              .and_then(|feedback| feedback.block_reason.clone())
            {   error!("Content blocked: {}", reason);
                return Err(crate::error::Error::ContentBlocked(
                  reason
                ));
            }
            error!("Empty response from Gemini");
            return Err(crate::error::Error::EmptyResponse);
        }

        Ok(parts.iter()
          .map(|part| part.text.as_str())
          .collect::<Vec<_>>()
          .concat())
    }

    fn name(&self) -> String
    {   format!("Gemini ({})", self.model_name)
    }
}
