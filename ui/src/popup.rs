//! Settings popup controller.
//!
//! DESIGN
//! ======
//! The popup has one input (the API key), three buttons (save, test, show/hide)
//! and one status line. `PopupController` holds the input visibility, the
//! status line and whether a connectivity test is in flight; the DOM host in
//! `dom::popup` performs the storage and runtime calls the controller asks for
//! and feeds their outcomes back in.
//!
//! Success statuses expire after [`STATUS_CLEAR_MS`]. Every status change bumps
//! a serial so that an expiry timer armed for an older status never clears a
//! newer one.

#[cfg(test)]
#[path = "popup_test.rs"]
mod popup_test;

use std::fmt::Display;

use common::{Credential, ExplanationRequest, ExplanationResult, StorageError};

/// How long a success status stays visible.
pub const STATUS_CLEAR_MS: u32 = 3000;

/// Base class of the status element; the kind class is appended.
pub const STATUS_BASE_CLASS: &str = "status-message";

// =============================================================================
// STATUS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Loading,
}

impl StatusKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Loading => "loading",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    /// Full `class` attribute value for the status element.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("{STATUS_BASE_CLASS} {}", self.kind.css_class())
    }
}

// =============================================================================
// VISIBILITY
// =============================================================================

/// Whether the key input shows its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyVisibility {
    #[default]
    Masked,
    Plain,
}

impl KeyVisibility {
    /// Value for the input's `type` attribute.
    #[must_use]
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Masked => "password",
            Self::Plain => "text",
        }
    }

    /// Label of the toggle button.
    #[must_use]
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Masked => "👁️",
            Self::Plain => "🙈",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Masked => Self::Plain,
            Self::Plain => Self::Masked,
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Debug, Default)]
pub struct PopupController {
    visibility: KeyVisibility,
    status: Option<Status>,
    testing: bool,
    status_serial: u64,
}

impl PopupController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> KeyVisibility {
        self.visibility
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// A connectivity test is in flight; the test button is disabled.
    pub fn is_testing(&self) -> bool {
        self.testing
    }

    /// Serial of the current status when it should expire, so the host can
    /// arm a [`STATUS_CLEAR_MS`] timer and call [`Self::expire_status`].
    pub fn pending_expiry(&self) -> Option<u64> {
        match &self.status {
            Some(status) if status.kind == StatusKind::Success => Some(self.status_serial),
            _ => None,
        }
    }

    // --- Outcomes and user actions ---

    /// The stored key was read on open. Returns the value to prefill.
    pub fn loaded(&mut self, result: Result<Option<Credential>, StorageError>) -> Option<String> {
        match result {
            Ok(Some(credential)) => {
                self.show(StatusKind::Success, "API key loaded");
                Some(credential.as_str().to_owned())
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("loading API key failed: {e}");
                self.show(StatusKind::Error, "Error loading API key");
                None
            }
        }
    }

    /// Save was clicked (or Enter pressed). Returns the credential to store.
    pub fn save_requested(&mut self, input: &str) -> Option<Credential> {
        let credential = Credential::parse(input);
        if credential.is_none() {
            self.show(StatusKind::Error, "Please enter an API key");
        }
        credential
    }

    pub fn saved(&mut self, result: Result<(), StorageError>) {
        match result {
            Ok(()) => self.show(StatusKind::Success, "API key saved successfully!"),
            Err(e) => {
                log::warn!("saving API key failed: {e}");
                self.show(StatusKind::Error, "Error saving API key");
            }
        }
    }

    /// Test was clicked. Returns the request to send to the background worker.
    ///
    /// The input must be non-empty, but the worker tests whichever key is
    /// stored; an unsaved edit is not what gets tested.
    pub fn test_requested(&mut self, input: &str) -> Option<ExplanationRequest> {
        if self.testing {
            return None;
        }
        if input.trim().is_empty() {
            self.show(StatusKind::Error, "Please enter an API key first");
            return None;
        }
        self.testing = true;
        self.show(StatusKind::Loading, "Testing API connection...");
        Some(ExplanationRequest::connectivity_test())
    }

    /// The connectivity test finished; `Err` means the worker was unreachable.
    pub fn test_finished<E: Display>(&mut self, outcome: Result<ExplanationResult, E>) {
        self.testing = false;
        match outcome {
            Ok(ExplanationResult::Success { .. }) => {
                self.show(StatusKind::Success, "API key is valid and working!");
            }
            Ok(ExplanationResult::Failure { error }) => {
                self.show(StatusKind::Error, format!("API test failed: {error}"));
            }
            Err(e) => {
                log::warn!("connectivity test could not reach the worker: {e}");
                self.show(StatusKind::Error, "Error testing API connection");
            }
        }
    }

    pub fn toggle_visibility(&mut self) -> KeyVisibility {
        self.visibility = self.visibility.toggled();
        self.visibility
    }

    /// The user typed into the key input.
    pub fn input_changed(&mut self) {
        self.clear();
    }

    /// An expiry timer fired for the status with `serial`.
    pub fn expire_status(&mut self, serial: u64) {
        if serial == self.status_serial {
            self.clear();
        }
    }

    fn show(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status_serial += 1;
        self.status = Some(Status { message: message.into(), kind });
    }

    fn clear(&mut self) {
        self.status_serial += 1;
        self.status = None;
    }
}
