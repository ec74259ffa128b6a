//! LLM types: wire shapes for `generateContent` and client errors.

use serde::Serialize;
use serde_json::Value;

use crate::config::GenerationParams;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request did not complete (connect, TLS, body read).
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The success body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The success body has no `candidates[0].content.parts[0].text`.
    #[error("API response has no candidate text")]
    MissingCandidate,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl crate::error::ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::MissingCandidate => "E_MISSING_CANDIDATE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
    pub generation_config: GenerationParams,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// A single-turn request carrying one text part.
    #[must_use]
    pub fn single_prompt(prompt: &'a str, generation_config: GenerationParams) -> Self {
        Self {
            contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }],
            generation_config,
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Text at `candidates[0].content.parts[0].text` of a `generateContent` body.
///
/// Walks the parsed JSON instead of deserializing into structs: a reply that
/// is valid JSON but has any level missing, `null` or of another type is
/// "no candidate text", never a parse failure.
#[must_use]
pub fn first_candidate_text(body: &Value) -> Option<String> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_owned)
}

// =============================================================================
// LLM GENERATE TRAIT
// =============================================================================

/// Single-prompt text generation. Enables mocking in tests.
///
/// Futures are not `Send` because the browser build runs on `fetch`.
#[async_trait::async_trait(?Send)]
pub trait LlmGenerate {
    /// Send `prompt` to the provider, authorized by `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the provider answers
    /// with a non-success status, or the body has an unexpected shape.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
