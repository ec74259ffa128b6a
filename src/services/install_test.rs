use super::*;
use serde_json::json;

#[test]
fn fresh_install_opens_popup_by_default() {
    assert!(should_open_popup(InstallReason::Install, InstallPolicy::default()));
}

#[test]
fn fresh_install_respects_opt_out() {
    let policy = InstallPolicy { open_popup_on_install: false };
    assert!(!should_open_popup(InstallReason::Install, policy));
}

#[test]
fn updates_never_open_popup() {
    for reason in [InstallReason::Update, InstallReason::ChromeUpdate, InstallReason::SharedModuleUpdate] {
        assert!(!should_open_popup(reason, InstallPolicy::default()), "{reason:?}");
    }
}

#[test]
fn details_parse_from_runtime_payload() {
    let details: InstallDetails =
        serde_json::from_value(json!({ "reason": "update", "previousVersion": "0.9.0" })).unwrap();
    assert_eq!(details.reason, InstallReason::Update);
    assert_eq!(details.previous_version.as_deref(), Some("0.9.0"));
    assert_eq!(details.previous_version_label(), "0.9.0");
}

#[test]
fn install_without_previous_version_is_labelled_none() {
    let details: InstallDetails = serde_json::from_value(json!({ "reason": "install" })).unwrap();
    assert_eq!(details.previous_version, None);
    assert_eq!(details.previous_version_label(), "none");
}

#[test]
fn unknown_reason_parses_as_other() {
    let details: InstallDetails = serde_json::from_value(json!({ "reason": "sideload" })).unwrap();
    assert_eq!(details.reason, InstallReason::Other);
    assert!(!should_open_popup(details.reason, InstallPolicy::default()));
}
