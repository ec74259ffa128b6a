//! Inbound runtime message routing.
//!
//! The worker answers only `explainText`. Routing looks at `action` before
//! decoding the payload, so a message addressed to the worker always gets a
//! reply even when its fields are missing or mistyped. Messages with any
//! other action are left for other listeners.

use common::{EXPLAIN_TEXT_ACTION, ExplanationRequest, ExplanationResult, KeyStore, RuntimeMessage};
use serde_json::Value;
use tracing::warn;

use crate::error::{ErrorCode, ExplainError};
use crate::llm::LlmGenerate;
use crate::services::explain::Explainer;

/// What the worker does with one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A well-formed request to run.
    Explain(ExplanationRequest),
    /// Addressed to the worker but undecodable; answer with this result.
    Rejected(ExplanationResult),
    /// Not addressed to the worker.
    Ignored,
}

/// Whether `message` carries `action: "explainText"`.
#[must_use]
pub fn is_explain_action(message: &Value) -> bool {
    message.get("action").and_then(Value::as_str) == Some(EXPLAIN_TEXT_ACTION)
}

/// Route a raw runtime message.
#[must_use]
pub fn route_message(message: Value) -> Inbound {
    if !is_explain_action(&message) {
        return Inbound::Ignored;
    }
    match serde_json::from_value::<RuntimeMessage>(message) {
        Ok(RuntimeMessage::ExplainText(request)) => Inbound::Explain(request),
        Err(e) => {
            let err = ExplainError::UnknownFailure(format!("malformed explain request: {e}"));
            warn!(code = err.error_code(), error = ?err, "rejecting runtime message");
            Inbound::Rejected(ExplanationResult::failure(err.to_string()))
        }
    }
}

impl<S: KeyStore, L: LlmGenerate> Explainer<S, L> {
    /// Answer one raw runtime message. `None` means the message was not for
    /// the worker and must get no reply from it.
    pub async fn handle_message(&self, message: Value) -> Option<ExplanationResult> {
        match route_message(message) {
            Inbound::Explain(request) => Some(self.request_explanation(&request).await),
            Inbound::Rejected(result) => Some(result),
            Inbound::Ignored => None,
        }
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
