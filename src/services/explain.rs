//! Explanation service: selected text → prompt → provider → result.
//!
//! DESIGN
//! ======
//! Receives an [`ExplanationRequest`] from the page or the popup, resolves
//! the stored credential, sends one prompt to the provider, and answers with
//! exactly one [`ExplanationResult`]. Every failure is folded into
//! `Failure(message)` here, so nothing ever escapes across the message
//! boundary. Requests are independent: no retries, no cancellation, no
//! shared state beyond the read-mostly credential.

use common::{ExplanationRequest, ExplanationResult, KeyStore};
use tracing::{debug, info, warn};

use crate::error::{ErrorCode, ExplainError};
use crate::llm::LlmGenerate;

/// Prompt used by the popup's connectivity test.
pub const CONNECTIVITY_PROMPT: &str =
    "Respond with 'API connection successful' to confirm the connection is working.";

const EXPLAIN_PROMPT_PREAMBLE: &str = "Please provide a clear, concise explanation of the following text. \
Focus on the key concepts, context, and meaning. Keep the explanation accessible and informative:";

/// Build the provider prompt for already-trimmed `text`.
#[must_use]
pub fn build_prompt(text: &str, test_mode: bool) -> String {
    if test_mode {
        CONNECTIVITY_PROMPT.to_owned()
    } else {
        format!("{EXPLAIN_PROMPT_PREAMBLE}\n\n\"{text}\"")
    }
}

// =============================================================================
// EXPLAINER
// =============================================================================

/// The privileged request handler: owns the credential store and the
/// provider client.
pub struct Explainer<S, L> {
    store: S,
    llm: L,
}

impl<S: KeyStore, L: LlmGenerate> Explainer<S, L> {
    #[must_use]
    pub fn new(store: S, llm: L) -> Self {
        Self { store, llm }
    }

    /// Handle one request. Never fails: errors become
    /// [`ExplanationResult::Failure`] carrying the user-facing message.
    pub async fn request_explanation(&self, request: &ExplanationRequest) -> ExplanationResult {
        match self.explain(request).await {
            Ok((explanation, original_text)) => {
                info!(test_mode = request.test_mode, chars = original_text.chars().count(), "explanation ready");
                ExplanationResult::success(explanation, original_text)
            }
            Err(err) => {
                warn!(code = err.error_code(), error = ?err, test_mode = request.test_mode, "explanation failed");
                ExplanationResult::failure(err.to_string())
            }
        }
    }

    async fn explain(&self, request: &ExplanationRequest) -> Result<(String, String), ExplainError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(ExplainError::EmptyInput);
        }

        let credential = self.store.get().await?.ok_or(ExplainError::MissingCredential)?;

        let prompt = build_prompt(text, request.test_mode);
        let explanation = self.llm.generate(credential.as_str(), &prompt).await.map_err(|e| {
            debug!(llm_code = e.error_code(), "provider call failed");
            ExplainError::from(e)
        })?;

        Ok((explanation, text.to_owned()))
    }
}

#[cfg(test)]
#[path = "explain_test.rs"]
mod tests;
