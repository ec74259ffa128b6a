//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper: one POST per prompt, API key in the `key` query
//! parameter, JSON body. Pure parsing in `parse_response` for testability.
//! No retries and no client-side timeout; a hung request stays pending until
//! the transport gives up.

use crate::config::{ExplainerConfig, GenerationParams};

use super::types::{GenerateContentRequest, LlmError, LlmGenerate, first_candidate_text};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    generation: GenerationParams,
}

impl GeminiClient {
    /// Build a client for the configured endpoint and model.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ExplainerConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: config.endpoint(), generation: config.generation })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait(?Send)]
impl LlmGenerate for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest::single_prompt(prompt, self.generation);

        // reqwest errors embed the request URL, which carries the key.
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(LlmError::ApiResponse { status: status.as_u16(), body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Only a body that is not JSON at all is a parse error; every other miss
/// is [`LlmError::MissingCandidate`].
fn parse_response(json: &str) -> Result<String, LlmError> {
    let body: serde_json::Value = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    first_candidate_text(&body).ok_or(LlmError::MissingCandidate)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
