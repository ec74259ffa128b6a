//! Install hook: first-run behavior of the background worker.
//!
//! On a fresh install the extension opens its configuration popup so the
//! user can enter an API key. Updates and browser upgrades do nothing.
//! [`InstallPolicy`] can switch the popup off.

use serde::Deserialize;

use crate::config::InstallPolicy;

/// `chrome.runtime.onInstalled` reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallReason {
    Install,
    Update,
    ChromeUpdate,
    SharedModuleUpdate,
    #[serde(other)]
    Other,
}

/// Payload of `chrome.runtime.onInstalled`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallDetails {
    pub reason: InstallReason,
    #[serde(default)]
    pub previous_version: Option<String>,
}

impl InstallDetails {
    /// Version before an update, or `"none"` for events that carry none.
    #[must_use]
    pub fn previous_version_label(&self) -> &str {
        self.previous_version.as_deref().unwrap_or("none")
    }
}

/// Whether the popup should be opened for this lifecycle event.
#[must_use]
pub fn should_open_popup(reason: InstallReason, policy: InstallPolicy) -> bool {
    reason == InstallReason::Install && policy.open_popup_on_install
}

#[cfg(test)]
#[path = "install_test.rs"]
mod tests;
