use super::*;
use serde_json::json;

// =============================================================
// RuntimeMessage
// =============================================================

#[test]
fn explain_request_serializes_with_action_tag() {
    let msg = RuntimeMessage::from(ExplanationRequest::new("quantum entanglement"));
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value, json!({ "action": "explainText", "text": "quantum entanglement" }));
}

#[test]
fn connectivity_test_sets_test_mode_on_the_wire() {
    let msg = RuntimeMessage::from(ExplanationRequest::connectivity_test());
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value, json!({ "action": "explainText", "text": "Hello world", "testMode": true }));
}

#[test]
fn test_mode_defaults_to_false_when_absent() {
    let msg: RuntimeMessage = serde_json::from_value(json!({ "action": "explainText", "text": "hi" })).unwrap();
    let RuntimeMessage::ExplainText(request) = msg;
    assert_eq!(request.text, "hi");
    assert!(!request.test_mode);
}

#[test]
fn unknown_action_is_rejected() {
    let result = serde_json::from_value::<RuntimeMessage>(json!({ "action": "somethingElse", "text": "x" }));
    assert!(result.is_err());
}

#[test]
fn missing_action_is_rejected() {
    let result = serde_json::from_value::<RuntimeMessage>(json!({ "text": "x" }));
    assert!(result.is_err());
}

// =============================================================
// ExplanationResult
// =============================================================

#[test]
fn success_serializes_flat() {
    let result = ExplanationResult::success("It means...", "quantum entanglement");
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({ "success": true, "explanation": "It means...", "originalText": "quantum entanglement" })
    );
}

#[test]
fn failure_serializes_flat() {
    let result = ExplanationResult::failure("No text provided for explanation.");
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value, json!({ "success": false, "error": "No text provided for explanation." }));
}

#[test]
fn failure_without_error_field_reads_as_empty_message() {
    let result: ExplanationResult = serde_json::from_value(json!({ "success": false })).unwrap();
    assert_eq!(result, ExplanationResult::failure(""));
}

#[test]
fn success_without_explanation_is_rejected() {
    let result = serde_json::from_value::<ExplanationResult>(json!({ "success": true, "originalText": "x" }));
    assert!(result.is_err());
}

#[test]
fn success_without_original_text_defaults_to_empty() {
    let result: ExplanationResult =
        serde_json::from_value(json!({ "success": true, "explanation": "answer" })).unwrap();
    assert_eq!(result, ExplanationResult::success("answer", ""));
    assert!(result.is_success());
}
