use super::*;

fn key(raw: &str) -> Credential {
    Credential::parse(raw).unwrap()
}

fn message(ctl: &PopupController) -> Option<(&str, StatusKind)> {
    ctl.status().map(|s| (s.message.as_str(), s.kind))
}

// =============================================================
// Visibility
// =============================================================

#[test]
fn key_starts_masked() {
    let ctl = PopupController::new();
    assert_eq!(ctl.visibility(), KeyVisibility::Masked);
    assert_eq!(ctl.visibility().input_type(), "password");
    assert_eq!(ctl.visibility().toggle_icon(), "👁️");
}

#[test]
fn toggle_flips_between_masked_and_plain() {
    let mut ctl = PopupController::new();
    assert_eq!(ctl.toggle_visibility(), KeyVisibility::Plain);
    assert_eq!(ctl.visibility().input_type(), "text");
    assert_eq!(ctl.visibility().toggle_icon(), "🙈");
    assert_eq!(ctl.toggle_visibility(), KeyVisibility::Masked);
}

// =============================================================
// Load
// =============================================================

#[test]
fn load_with_stored_key_prefills_and_reports() {
    let mut ctl = PopupController::new();
    let prefill = ctl.loaded(Ok(Some(key("AIza-123"))));
    assert_eq!(prefill.as_deref(), Some("AIza-123"));
    assert_eq!(message(&ctl), Some(("API key loaded", StatusKind::Success)));
}

#[test]
fn load_without_key_is_silent() {
    let mut ctl = PopupController::new();
    assert!(ctl.loaded(Ok(None)).is_none());
    assert!(ctl.status().is_none());
}

#[test]
fn load_failure_reports_error() {
    let mut ctl = PopupController::new();
    assert!(ctl.loaded(Err(StorageError::Backend("quota".into()))).is_none());
    assert_eq!(message(&ctl), Some(("Error loading API key", StatusKind::Error)));
}

// =============================================================
// Save
// =============================================================

#[test]
fn save_blank_input_is_rejected() {
    let mut ctl = PopupController::new();
    assert!(ctl.save_requested("   ").is_none());
    assert_eq!(message(&ctl), Some(("Please enter an API key", StatusKind::Error)));
}

#[test]
fn save_trims_input() {
    let mut ctl = PopupController::new();
    let credential = ctl.save_requested("  AIza-123 \n").unwrap();
    assert_eq!(credential.as_str(), "AIza-123");
}

#[test]
fn save_outcomes() {
    let mut ctl = PopupController::new();
    ctl.saved(Ok(()));
    assert_eq!(message(&ctl), Some(("API key saved successfully!", StatusKind::Success)));
    ctl.saved(Err(StorageError::Backend("offline".into())));
    assert_eq!(message(&ctl), Some(("Error saving API key", StatusKind::Error)));
}

// =============================================================
// Connectivity test
// =============================================================

#[test]
fn test_blank_input_is_rejected() {
    let mut ctl = PopupController::new();
    assert!(ctl.test_requested("").is_none());
    assert!(!ctl.is_testing());
    assert_eq!(message(&ctl), Some(("Please enter an API key first", StatusKind::Error)));
}

#[test]
fn test_sends_connectivity_request_and_disables_button() {
    let mut ctl = PopupController::new();
    let request = ctl.test_requested("AIza-123").unwrap();
    assert!(request.test_mode);
    assert_eq!(request.text, "Hello world");
    assert!(ctl.is_testing());
    assert_eq!(message(&ctl), Some(("Testing API connection...", StatusKind::Loading)));
}

#[test]
fn second_test_while_running_is_ignored() {
    let mut ctl = PopupController::new();
    ctl.test_requested("AIza-123");
    assert!(ctl.test_requested("AIza-123").is_none());
}

#[test]
fn test_success() {
    let mut ctl = PopupController::new();
    ctl.test_requested("AIza-123");
    ctl.test_finished::<String>(Ok(ExplanationResult::success("API test successful", "Hello world")));
    assert!(!ctl.is_testing());
    assert_eq!(message(&ctl), Some(("API key is valid and working!", StatusKind::Success)));
}

#[test]
fn test_failure_includes_provider_message() {
    let mut ctl = PopupController::new();
    ctl.test_requested("bad");
    ctl.test_finished::<String>(Ok(ExplanationResult::failure(
        "Invalid API key. Please check your Gemini API key.",
    )));
    assert!(!ctl.is_testing());
    assert_eq!(
        message(&ctl),
        Some(("API test failed: Invalid API key. Please check your Gemini API key.", StatusKind::Error))
    );
}

#[test]
fn test_unreachable_worker() {
    let mut ctl = PopupController::new();
    ctl.test_requested("AIza-123");
    ctl.test_finished(Err("Could not establish connection"));
    assert!(!ctl.is_testing());
    assert_eq!(message(&ctl), Some(("Error testing API connection", StatusKind::Error)));
}

// =============================================================
// Status lifecycle
// =============================================================

#[test]
fn status_class_names() {
    let status = Status { message: "x".into(), kind: StatusKind::Loading };
    assert_eq!(status.class_name(), "status-message loading");
}

#[test]
fn typing_clears_status() {
    let mut ctl = PopupController::new();
    ctl.save_requested("");
    ctl.input_changed();
    assert!(ctl.status().is_none());
}

#[test]
fn only_success_status_expires() {
    let mut ctl = PopupController::new();
    ctl.save_requested("");
    assert!(ctl.pending_expiry().is_none());

    ctl.saved(Ok(()));
    let serial = ctl.pending_expiry().unwrap();
    ctl.expire_status(serial);
    assert!(ctl.status().is_none());
}

#[test]
fn stale_expiry_keeps_newer_status() {
    let mut ctl = PopupController::new();
    ctl.saved(Ok(()));
    let serial = ctl.pending_expiry().unwrap();
    ctl.test_requested("AIza-123");
    ctl.expire_status(serial);
    assert_eq!(message(&ctl), Some(("Testing API connection...", StatusKind::Loading)));
}
