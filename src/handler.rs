//! Universal handler over the selected provider adapter

use log::{debug, error, info};

/// Holds exactly one adapter, selected once at construction
///
/// This is the single point where adapter failures stop
/// propagating: `get_response` converts every error into a
/// failure-annotated outcome so upper layers never need
/// backend-specific error handling.
pub struct UniversalHandler
{   adapter: Box<dyn crate::providers::ProviderAdapter>
}

impl UniversalHandler
{   /// Select the provider named by the configuration,
    /// falling back to the fixed default when unset
    pub async fn from_config(
      config: &crate::config::ReviewerConfig
    ) -> Result<Self, crate::error::Error>
    {   let id = config.provider.clone()
          .unwrap_or_else(|| crate::DEFAULT_PROVIDER.to_string());
        Self::with_provider(&id, config).await
    }

    /// Select an explicit provider identifier
    pub async fn with_provider(
      id: &str
    , config: &crate::config::ReviewerConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Initializing handler with provider: {}", id);
        let adapter
          = crate::providers::create_adapter(id, config).await?;
        info!("Initialized {}", adapter.name());
        Ok(UniversalHandler
        {   adapter
        })
    }

    pub fn provider_name(&self) -> String
    {   self.adapter.name()
    }

    /// Universal generation call; never fails
    ///
    /// Any adapter error (upstream status, transport failure,
    /// timeout) becomes a `Failed` outcome carrying the provider
    /// name and error description.
    pub async fn get_response(
      &self
    , prompt: &str
    , system_message: &str
    , max_tokens: usize
    , temperature: f32
    ) -> crate::request::GenerationOutcome
    {   let request = crate::request::GenerationRequest
        {   prompt: prompt.to_string()
          , system_message: system_message.to_string()
          , max_tokens
          , temperature
        };

        match self.adapter.generate(&request).await
        {   Ok(text) => {
              crate::request::GenerationOutcome::Completed
              {   text
              }
            }
          , Err(error) => {
              error!(
                "Generation failed via {}: {}",
                self.adapter.name(), error
              );
              crate::request::GenerationOutcome::Failed
              {   provider: self.adapter.name()
                , error
              }
            }
        }
    }
}
