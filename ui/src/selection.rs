//! Selection controller: the page-side state machine.
//!
//! `SelectionController` owns all state of the content script and none of
//! the DOM. Each handler takes one page event and returns the [`Effect`]s the
//! host must apply, so the whole flow can be tested without a browser:
//!
//! | From | Event | To |
//! |------|-------|----|
//! | Idle | selection settled, 1..=5000 chars | ButtonShown |
//! | ButtonShown | mouse-down off the button, Escape, empty/long selection | Idle |
//! | ButtonShown | trigger clicked | ModalLoading |
//! | ModalLoading | result for the current flow | ModalResult |
//! | ModalLoading / ModalResult | close control, direct overlay click, Escape | Idle |
//!
//! Only one explanation flow is live at a time. Each trigger gets a fresh
//! [`FlowId`]; a result for any other flow (e.g. the modal was closed while
//! loading) is dropped.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use common::{ExplanationResult, MAX_SELECTION_CHARS};

use crate::render;

/// Delay between mouse-up and reading the selection, so the browser has
/// finished updating it.
pub const SETTLE_DELAY_MS: u32 = 10;

/// Vertical gap between the selection and the trigger button.
pub const BUTTON_GAP_PX: f64 = 5.0;

/// Identifies one trigger → result round trip.
pub type FlowId = u64;

/// Viewport-relative bounding box of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Where a selection sits on the page: its box plus the page scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    pub rect: Rect,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Document-relative position of the trigger button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPosition {
    pub top: f64,
    pub left: f64,
}

/// Place the button just under the selection, horizontally centered on it.
#[must_use]
pub fn button_position(anchor: Anchor, button_width: f64) -> ButtonPosition {
    let rect = anchor.rect;
    ButtonPosition {
        top: rect.bottom() + anchor.scroll_y + BUTTON_GAP_PX,
        left: rect.left + anchor.scroll_x + rect.width / 2.0 - button_width / 2.0,
    }
}

/// Whether a selection qualifies for the trigger button.
#[must_use]
pub fn is_explainable(text: &str) -> bool {
    let len = text.trim().chars().count();
    len > 0 && len <= MAX_SELECTION_CHARS
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// The trigger button is visible under `anchor`.
    ButtonShown { anchor: Anchor },
    /// The modal shows the spinner while `flow` is in flight.
    ModalLoading { flow: FlowId },
    /// The modal shows an explanation or an error.
    ModalResult,
}

/// Instructions for the DOM host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Wait [`SETTLE_DELAY_MS`], then call [`SelectionController::selection_settled`].
    ScheduleSelectionCheck,
    /// Make the button visible and place it with [`button_position`].
    ShowButton(Anchor),
    HideButton,
    /// Create the overlay if needed and set the modal's inner HTML.
    ShowModal(String),
    /// Remove the overlay and restore page scrolling.
    CloseModal,
    /// Send an `explainText` message; report back via [`SelectionController::result_arrived`].
    SendRequest { flow: FlowId, text: String },
}

#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    last_flow: FlowId,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        matches!(self.state, SelectionState::ModalLoading { .. } | SelectionState::ModalResult)
    }

    // --- Page events ---

    /// Mouse released anywhere on the page.
    pub fn mouse_up(&self) -> Vec<Effect> {
        if self.is_modal_open() {
            return Vec::new();
        }
        vec![Effect::ScheduleSelectionCheck]
    }

    /// The selection has settled after a mouse-up.
    pub fn selection_settled(&mut self, text: &str, anchor: Anchor) -> Vec<Effect> {
        if self.is_modal_open() {
            return Vec::new();
        }
        if is_explainable(text) {
            self.state = SelectionState::ButtonShown { anchor };
            return vec![Effect::ShowButton(anchor)];
        }
        self.hide_button()
    }

    /// Mouse pressed; `on_button` when the target is the trigger button.
    pub fn mouse_down(&mut self, on_button: bool) -> Vec<Effect> {
        if on_button {
            return Vec::new();
        }
        self.hide_button()
    }

    /// The trigger button was clicked while `selected_text` is selected.
    pub fn trigger(&mut self, selected_text: &str) -> Vec<Effect> {
        if !matches!(self.state, SelectionState::ButtonShown { .. }) {
            return Vec::new();
        }
        if !is_explainable(selected_text) {
            return self.hide_button();
        }

        self.last_flow += 1;
        let flow = self.last_flow;
        self.state = SelectionState::ModalLoading { flow };
        vec![
            Effect::HideButton,
            Effect::ShowModal(render::loading_modal()),
            Effect::SendRequest { flow, text: selected_text.trim().to_owned() },
        ]
    }

    /// The background worker answered `flow`.
    pub fn result_arrived(&mut self, flow: FlowId, result: &ExplanationResult) -> Vec<Effect> {
        match self.state {
            SelectionState::ModalLoading { flow: current } if current == flow => {
                self.state = SelectionState::ModalResult;
                vec![Effect::ShowModal(render::result_modal(result))]
            }
            _ => {
                log::debug!("dropping result for stale flow {flow}");
                Vec::new()
            }
        }
    }

    /// A close control inside the modal was activated.
    pub fn close(&mut self) -> Vec<Effect> {
        if !self.is_modal_open() {
            return Vec::new();
        }
        self.state = SelectionState::Idle;
        vec![Effect::CloseModal]
    }

    /// The overlay received a click; `direct` when the overlay itself (not
    /// the modal inside it) is the target.
    pub fn overlay_clicked(&mut self, direct: bool) -> Vec<Effect> {
        if direct { self.close() } else { Vec::new() }
    }

    pub fn key_down(&mut self, key: &str) -> Vec<Effect> {
        if key != "Escape" {
            return Vec::new();
        }
        if self.is_modal_open() { self.close() } else { self.hide_button() }
    }

    /// The page is going away.
    pub fn unload(&mut self) -> Vec<Effect> {
        let effects = match self.state {
            SelectionState::Idle => Vec::new(),
            SelectionState::ButtonShown { .. } => vec![Effect::HideButton],
            SelectionState::ModalLoading { .. } | SelectionState::ModalResult => {
                vec![Effect::HideButton, Effect::CloseModal]
            }
        };
        self.state = SelectionState::Idle;
        effects
    }

    fn hide_button(&mut self) -> Vec<Effect> {
        if matches!(self.state, SelectionState::ButtonShown { .. }) {
            self.state = SelectionState::Idle;
            return vec![Effect::HideButton];
        }
        Vec::new()
    }
}
