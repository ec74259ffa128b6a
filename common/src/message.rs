//! Runtime message model.
//!
//! DESIGN
//! ======
//! One request in, one result out. The page context and the popup send a
//! [`RuntimeMessage`] through `chrome.runtime.sendMessage`; the background
//! worker answers with exactly one [`ExplanationResult`]. JSON shapes:
//!
//! - request: `{ "action": "explainText", "text": "...", "testMode": true }`
//! - success: `{ "success": true, "explanation": "...", "originalText": "..." }`
//! - failure: `{ "success": false, "error": "..." }`

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

/// Longest selection (in characters, after trimming) the page will send.
pub const MAX_SELECTION_CHARS: usize = 5000;

/// `action` value of [`RuntimeMessage::ExplainText`].
pub const EXPLAIN_TEXT_ACTION: &str = "explainText";

/// Text sent by the popup's connectivity test.
pub const CONNECTIVITY_TEST_TEXT: &str = "Hello world";

// =============================================================================
// REQUEST
// =============================================================================

/// A message addressed to the background worker, routed on `action`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum RuntimeMessage {
    /// Ask the provider to explain a piece of text.
    #[serde(rename = "explainText")]
    ExplainText(ExplanationRequest),
}

/// Text to explain plus the connectivity-test flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub text: String,
    /// Replace the explanation prompt with a fixed connectivity check.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub test_mode: bool,
}

impl ExplanationRequest {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), test_mode: false }
    }

    /// The request the popup sends to verify the stored key works.
    #[must_use]
    pub fn connectivity_test() -> Self {
        Self { text: CONNECTIVITY_TEST_TEXT.to_owned(), test_mode: true }
    }
}

impl From<ExplanationRequest> for RuntimeMessage {
    fn from(request: ExplanationRequest) -> Self {
        Self::ExplainText(request)
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// Outcome of one explanation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireReply", into = "WireReply")]
pub enum ExplanationResult {
    Success {
        explanation: String,
        /// The trimmed text that was explained.
        original_text: String,
    },
    Failure {
        /// Short user-facing message.
        error: String,
    },
}

impl ExplanationResult {
    #[must_use]
    pub fn success(explanation: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self::Success { explanation: explanation.into(), original_text: original_text.into() }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure { error: error.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Flat JSON shape of [`ExplanationResult`] on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReply {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TryFrom<WireReply> for ExplanationResult {
    type Error = String;

    fn try_from(wire: WireReply) -> Result<Self, Self::Error> {
        if !wire.success {
            return Ok(Self::Failure { error: wire.error.unwrap_or_default() });
        }
        let explanation = wire
            .explanation
            .ok_or_else(|| "successful reply is missing `explanation`".to_owned())?;
        Ok(Self::Success { explanation, original_text: wire.original_text.unwrap_or_default() })
    }
}

impl From<ExplanationResult> for WireReply {
    fn from(result: ExplanationResult) -> Self {
        match result {
            ExplanationResult::Success { explanation, original_text } => Self {
                success: true,
                explanation: Some(explanation),
                original_text: Some(original_text),
                error: None,
            },
            ExplanationResult::Failure { error } => {
                Self { success: false, explanation: None, original_text: None, error: Some(error) }
            }
        }
    }
}
