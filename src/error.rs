use std::fmt;

/// Custom error type for review relay operations
/// Implements Clone so results can be asserted in tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is missing for a provider
    MissingApiKey(String)
  , /// Provider identifier outside the closed set
    UnsupportedProvider(String)
  , /// Backend returned a non-success HTTP status
    Upstream
    {   status: u16
      , body: String
    }
  , /// Network-level failure reaching the backend
    Transport(String)
  , /// Request timed out
    Timeout
  , /// Failed to parse a success response body
    Parse(String)
  , /// Success envelope carried no extractable text
    EmptyResponse
  , /// Backend declined to answer for policy reasons
    ContentBlocked(String)
  , /// Caller-supplied input was rejected
    InvalidRequest(String)
}

impl Error
{   /// Map a reqwest failure onto the transport variants
    pub fn from_transport(err: reqwest::Error) -> Self
    {   if err.is_timeout()
        {   Error::Timeout
        } else
        {   Error::Transport(err.to_string())
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey(provider) => {
              write!(f, "Missing API key for: {}", provider)
            }
          , Error::UnsupportedProvider(id) => {
              write!(f, "Unsupported provider: {}", id)
            }
          , Error::Upstream { status, body } => {
              write!(f, "API error {}: {}", status, body)
            }
          , Error::Transport(msg) => {
              write!(f, "Transport error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::Parse(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::EmptyResponse => {
              write!(f, "API response contained no content")
            }
          , Error::ContentBlocked(reason) => {
              write!(f, "Content blocked: {}", reason)
            }
          , Error::InvalidRequest(msg) => {
              write!(f, "Invalid request: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}
