//! Explanation error taxonomy.
//!
//! DESIGN
//! ======
//! Every failure of an explanation request is terminal and ends up as one
//! short user-facing string in the modal or the popup. [`ExplainError`]'s
//! `Display` *is* that string; [`classify_http_error`] maps a non-2xx
//! provider reply onto a variant. Both are pure so they can be tested on
//! their own. [`ErrorCode`] gives each variant a grepable code for logs.

use common::StorageError;

use crate::llm::LlmError;

/// Fallback message for unmapped provider failures without a message body.
pub const GENERIC_API_FAILURE: &str = "API request failed";

/// Grepable error codes for structured logs.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

/// Why an explanation request failed. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplainError {
    /// The text was empty after trimming.
    #[error("No text provided for explanation.")]
    EmptyInput,

    /// No API key is stored.
    #[error("No API key found. Please configure your Gemini API key in the extension popup.")]
    MissingCredential,

    /// Provider answered 401.
    #[error("Invalid API key. Please check your Gemini API key.")]
    Unauthorized,

    /// Provider answered 429.
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Provider answered 400.
    #[error("Invalid request. Please try selecting different text.")]
    BadRequest,

    /// Any other non-2xx status; `message` comes from the provider's error body.
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_API_FAILURE))]
    ProviderError { status: u16, message: Option<String> },

    /// 2xx reply without `candidates[0].content.parts[0].text`.
    #[error("Unexpected response format from API. Please try again.")]
    MalformedResponse,

    /// The request never completed (DNS, TLS, connection reset, ...).
    #[error("Network error. Please check your internet connection.")]
    NetworkFailure(String),

    /// The 2xx reply body was not valid JSON.
    #[error("Error processing API response. Please try again.")]
    ResponseParseFailure(String),

    /// Anything else: storage failures, HTTP client construction.
    #[error("An unexpected error occurred")]
    UnknownFailure(String),
}

impl ErrorCode for ExplainError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "E_EMPTY_INPUT",
            Self::MissingCredential => "E_MISSING_CREDENTIAL",
            Self::Unauthorized => "E_UNAUTHORIZED",
            Self::RateLimited => "E_RATE_LIMITED",
            Self::BadRequest => "E_BAD_REQUEST",
            Self::ProviderError { .. } => "E_PROVIDER_ERROR",
            Self::MalformedResponse => "E_MALFORMED_RESPONSE",
            Self::NetworkFailure(_) => "E_NETWORK_FAILURE",
            Self::ResponseParseFailure(_) => "E_RESPONSE_PARSE",
            Self::UnknownFailure(_) => "E_UNKNOWN",
        }
    }
}

/// Map a non-2xx provider status and raw body onto an [`ExplainError`].
///
/// 401, 429 and 400 have fixed messages. Anything else uses the provider's
/// `error.message` when the body carries a non-empty one. A body that is not
/// JSON counts as empty.
#[must_use]
pub fn classify_http_error(status: u16, body: &str) -> ExplainError {
    match status {
        401 => ExplainError::Unauthorized,
        429 => ExplainError::RateLimited,
        400 => ExplainError::BadRequest,
        _ => ExplainError::ProviderError { status, message: provider_error_message(body) },
    }
}

fn provider_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?;
    if message.is_empty() { None } else { Some(message.to_owned()) }
}

impl From<LlmError> for ExplainError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::ApiRequest(detail) => Self::NetworkFailure(detail),
            LlmError::ApiResponse { status, body } => classify_http_error(status, &body),
            LlmError::ApiParse(detail) => Self::ResponseParseFailure(detail),
            LlmError::MissingCandidate => Self::MalformedResponse,
            LlmError::HttpClientBuild(detail) => Self::UnknownFailure(detail),
        }
    }
}

impl From<StorageError> for ExplainError {
    fn from(err: StorageError) -> Self {
        Self::UnknownFailure(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
