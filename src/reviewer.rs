//! Review orchestration: prompt construction and result shaping

use serde::{Deserialize, Serialize};
use log::{debug, error};

/// Review instructions sent as the system message
const SYSTEM_MESSAGE: &str = "\
You are an expert code reviewer. Perform comprehensive code reviews.

Provide STRUCTURED reviews with these sections:

1. **CODE SUMMARY** - What the code does and overall quality
2. **BUGS & LOGICAL ERRORS** - Syntax/runtime errors, logical mistakes
3. **SECURITY ISSUES** - Vulnerabilities and security improvements
4. **PERFORMANCE ISSUES** - Inefficient patterns and optimizations
5. **CODE QUALITY** - Readability, naming, best practices
6. **MAINTAINABILITY** - Organization, documentation, error handling
7. **SUGGESTED IMPROVEMENTS** - Actionable improvements with code examples
8. **OVERALL RATING** - Rate 1-10 with justification

Be CRITICAL but CONSTRUCTIVE. Provide CODE EXAMPLES for fixes.
Use markdown formatting for better readability.";

/// Extra instruction appended for the Gemini backend
const GEMINI_ADDENDUM: &str = "\n\nNote: Please provide clear, \
structured analysis with practical coding examples. Focus on \
actionable improvements.";

/// Used when no rating mark is found in the review text
const DEFAULT_RATING: u8 = 7;

/// Review calls cap the response shorter than the generation
/// default
const REVIEW_MAX_TOKENS: usize = 1000;
const REVIEW_TEMPERATURE: f32 = 0.3;

/// Shaped result of one review call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport
{   pub full_review: String
  , pub summary: String
  , pub rating: u8
  , pub language: String
  , pub provider: String
}

/// Best-effort language guess from keyword substrings
///
/// Not a parser; two keywords per language, defaulting to
/// python for anything unrecognized.
pub fn detect_language(code: &str) -> &'static str
{   let code_lower = code.to_lowercase();
    if code_lower.contains("def ")
      || code_lower.contains("import ")
    {   "python"
    } else if code_lower.contains("function")
      || code_lower.contains("const ")
    {   "javascript"
    } else
    {   "python"
    }
}

/// Build the review prompt around the verbatim code
pub fn build_review_prompt(
  code: &str
, language: &str
, focus_areas: &[String]
) -> String
{   let mut prompt = format!(
      "Review this {} code:\n```{}\n{}\n```\n",
      language, language, code
    );
    prompt.push_str(
      "Provide feedback on bugs, security, performance, \
       and code quality."
    );
    if !focus_areas.is_empty()
    {   prompt.push_str(&format!(
          "\nFocus especially on: {}.",
          focus_areas.join(", ")
        ));
    }
    prompt
}

/// Scan review text for an N/10 rating mark
///
/// Returns the first mark whose value lands in 1..=10.
pub fn extract_rating(review: &str) -> Option<u8>
{   let bytes = review.as_bytes();
    let mut index = 0;
    while let Some(pos) = review[index..].find("/10")
    {   let slash = index + pos;
        let mut start = slash;
        while start > 0 && bytes[start - 1].is_ascii_digit()
        {   start -= 1;
        }
        if start < slash
        {   if let Ok(value) = review[start..slash].parse::<u8>()
            {   if (1..=10).contains(&value)
                {   return Some(value);
                }
            }
        }
        index = slash + 3;
    }
    None
}

/// Orchestrates one review per call through the handler
pub struct CodeReviewer
{   handler: crate::handler::UniversalHandler
}

impl CodeReviewer
{   pub fn new(handler: crate::handler::UniversalHandler) -> Self
    {   CodeReviewer
        {   handler
        }
    }

    /// Construct with the provider the configuration selects
    pub async fn from_config(
      config: &crate::config::ReviewerConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!("Initializing CodeReviewer");
        let handler
          = crate::handler::UniversalHandler::from_config(config)
            .await?;
        Ok(Self::new(handler))
    }

    pub fn provider_name(&self) -> String
    {   self.handler.provider_name()
    }

    fn system_message(&self) -> String
    {   let mut message = SYSTEM_MESSAGE.to_string();
        if self.handler.provider_name()
          .to_lowercase()
          .contains("gemini")
        {   message.push_str(GEMINI_ADDENDUM);
        }
        message
    }

    /// Review a piece of source code
    ///
    /// Exactly one outbound call; a backend failure still yields
    /// a report whose full_review carries the failure text.
    pub async fn review_code(
      &self
    , code: &str
    , focus_areas: &[String]
    , language: Option<&str>
    ) -> Result<ReviewReport, crate::error::Error>
    {   debug!("Starting code review");

        if code.trim().is_empty()
        {   error!("Rejecting review of empty code");
            return Err(crate::error::Error::InvalidRequest(
              "code must not be empty".to_string()
            ));
        }

        let language = match language
        {   Some(name) if !name.is_empty() => name.to_string()
          , _ => detect_language(code).to_string()
        };

        let prompt
          = build_review_prompt(code, &language, focus_areas);

        let outcome = self.handler
          .get_response(
            &prompt
          , &self.system_message()
          , REVIEW_MAX_TOKENS
          , REVIEW_TEMPERATURE
          )
          .await;

        let rating = match &outcome
        {   crate::request::GenerationOutcome::Completed { text } => {
              extract_rating(text).unwrap_or(DEFAULT_RATING)
            }
          , crate::request::GenerationOutcome::Failed { .. } => {
              DEFAULT_RATING
            }
        };

        Ok(ReviewReport
        {   full_review: outcome.into_text()
          , summary: "Review completed successfully".to_string()
          , rating
          , language
          , provider: self.handler.provider_name()
        })
    }
}
