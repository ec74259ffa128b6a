//! # ui
//!
//! Page-side half of the text-explainer extension: the content script that
//! puts a trigger button under selected text and shows the explanation modal,
//! and the settings popup that manages the API key.
//!
//! All state lives in plain controllers ([`selection::SelectionController`],
//! [`popup::PopupController`]) that take events and return what to do. The
//! `dom` layer, compiled only with the `web` feature, translates browser
//! events into controller calls and applies the results to the page.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`selection`] | Content-script state machine and button placement |
//! | [`render`] | Escaped modal markup |
//! | [`popup`] | Popup status line, key visibility and test flow |
//! | `dom` | `web-sys` hosts for both contexts (`web` only) |

pub mod popup;
pub mod render;
pub mod selection;

#[cfg(feature = "web")]
mod dom;

#[cfg(feature = "web")]
mod entry {
    use wasm_bindgen::prelude::*;

    fn init_logging() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            log::warn!("console logger already installed: {e}");
        }
    }

    /// Content script entry: attach the selection host to the page.
    #[wasm_bindgen]
    pub fn start_content() -> Result<(), JsValue> {
        init_logging();
        crate::dom::content::attach()
    }

    /// Popup entry: bind the settings form.
    #[wasm_bindgen]
    pub fn start_popup() -> Result<(), JsValue> {
        init_logging();
        crate::dom::popup::attach()
    }
}
