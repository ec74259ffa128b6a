use super::*;

fn make_response(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 20, "candidatesTokenCount": 50, "totalTokenCount": 70 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let text = parse_response(&make_response("Quantum entanglement is...")).unwrap();
    assert_eq!(text, "Quantum entanglement is...");
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_missing_candidates() {
    let err = parse_response(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
    assert!(matches!(err, LlmError::MissingCandidate));
}

#[test]
fn parse_candidate_without_parts() {
    let err = parse_response(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap_err();
    assert!(matches!(err, LlmError::MissingCandidate));
}

#[test]
fn parse_wrong_typed_shape_is_missing_candidate() {
    let bodies = [
        r#"{"candidates":[{"content":"oops"}]}"#,
        r#"{"candidates":{"x":1}}"#,
        r#"{"candidates":[{"content":{"parts":[{"text":42}]}}]}"#,
    ];
    for body in bodies {
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, LlmError::MissingCandidate), "{body}: {err:?}");
        assert_eq!(
            crate::error::ExplainError::from(err).to_string(),
            "Unexpected response format from API. Please try again."
        );
    }
}

#[test]
fn client_uses_configured_endpoint() {
    let config = ExplainerConfig { model: "gemini-test".into(), ..ExplainerConfig::default() };
    let client = GeminiClient::new(&config).unwrap();
    assert_eq!(
        client.endpoint(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent"
    );
}
