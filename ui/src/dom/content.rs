//! Content-script host.
//!
//! Creates the trigger button and the (detached) modal overlay once, wires
//! document, window and element listeners to the [`SelectionController`], and
//! applies the [`Effect`]s it returns.

use std::cell::RefCell;
use std::rc::Rc;

use common::chrome;
use common::{ExplanationRequest, ExplanationResult, RuntimeMessage};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, Node};

use crate::render;
use crate::selection::{Anchor, Effect, FlowId, Rect, SETTLE_DELAY_MS, SelectionController, button_position};

const BUTTON_CLASS: &str = "text-explainer-button";
const BUTTON_LABEL: &str = "🔍 Explain";
const BUTTON_TITLE: &str = "Click to explain selected text";
const OVERLAY_CLASS: &str = "text-explainer-modal-overlay";
const MODAL_CLASS: &str = "text-explainer-modal";
const CLOSE_SELECTOR: &str = ".modal-close, .modal-close-btn";
const Z_INDEX: &str = "999999";

struct ContentHost {
    controller: RefCell<SelectionController>,
    body: HtmlElement,
    button: HtmlElement,
    overlay: HtmlElement,
    modal: HtmlElement,
}

/// Build the host and register its listeners.
pub fn attach() -> Result<(), JsValue> {
    let document = super::document()?;
    let body = document.body().ok_or_else(|| JsValue::from_str("page has no body"))?;

    let button = create_button(&document)?;
    body.append_child(&button)?;
    let overlay = create_div(&document, OVERLAY_CLASS)?;
    let modal = create_div(&document, MODAL_CLASS)?;
    overlay.append_child(&modal)?;

    let host = Rc::new(ContentHost {
        controller: RefCell::new(SelectionController::new()),
        body,
        button,
        overlay,
        modal,
    });
    host.bind(&document)?;
    log::info!("text explainer content script attached");
    Ok(())
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
    let element: HtmlElement = document.create_element("div")?.dyn_into()?;
    element.set_class_name(class);
    Ok(element)
}

fn create_button(document: &Document) -> Result<HtmlElement, JsValue> {
    let button = create_div(document, BUTTON_CLASS)?;
    button.set_text_content(Some(BUTTON_LABEL));
    button.set_title(BUTTON_TITLE);
    let style = button.style();
    style.set_property("display", "none")?;
    style.set_property("position", "absolute")?;
    style.set_property("z-index", Z_INDEX)?;
    Ok(button)
}

/// Selected text and its placement, if anything is selected.
fn read_selection() -> Result<Option<(String, Anchor)>, JsValue> {
    let window = super::window()?;
    let Some(selection) = window.get_selection()? else {
        return Ok(None);
    };
    if selection.range_count() == 0 {
        return Ok(None);
    }
    let text = String::from(selection.to_string());
    let bounds = selection.get_range_at(0)?.get_bounding_client_rect();
    let anchor = Anchor {
        rect: Rect { left: bounds.left(), top: bounds.top(), width: bounds.width(), height: bounds.height() },
        scroll_x: window.scroll_x()?,
        scroll_y: window.scroll_y()?,
    };
    Ok(Some((text, anchor)))
}

/// Whether `node` itself (not a descendant) received the event.
fn is_target(event: &Event, node: &Node) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Node>().ok())
        .is_some_and(|target| node.is_same_node(Some(&target)))
}

/// Whether the event came from a close button inside the modal.
fn is_close_control(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(CLOSE_SELECTOR).unwrap_or_default())
        .is_some()
}

impl ContentHost {
    fn bind(self: &Rc<Self>, document: &Document) -> Result<(), JsValue> {
        let host = Rc::clone(self);
        super::listen(document, "mouseup", move |_| {
            let effects = host.controller.borrow().mouse_up();
            host.apply(effects);
        })?;

        let host = Rc::clone(self);
        super::listen(document, "mousedown", move |event| {
            let on_button = host.is_button(&event);
            let effects = host.controller.borrow_mut().mouse_down(on_button);
            host.apply(effects);
        })?;

        let host = Rc::clone(self);
        super::listen(document, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            let effects = host.controller.borrow_mut().key_down(&key);
            host.apply(effects);
        })?;

        let host = Rc::clone(self);
        super::listen(&super::window()?, "beforeunload", move |_| {
            let effects = host.controller.borrow_mut().unload();
            host.apply(effects);
        })?;

        // Keep the page's own mousedown handling away from the button.
        super::listen(&self.button, "mousedown", |event| event.stop_propagation())?;

        let host = Rc::clone(self);
        super::listen(&self.button, "click", move |event| {
            event.stop_propagation();
            let text = match read_selection() {
                Ok(selection) => selection.map(|(text, _)| text).unwrap_or_default(),
                Err(e) => {
                    log::warn!("reading selection failed: {}", chrome::describe_js(&e));
                    String::new()
                }
            };
            let effects = host.controller.borrow_mut().trigger(&text);
            host.apply(effects);
        })?;

        let host = Rc::clone(self);
        super::listen(&self.overlay, "click", move |event| {
            let effects = if is_close_control(&event) {
                host.controller.borrow_mut().close()
            } else {
                let direct = is_target(&event, &host.overlay);
                host.controller.borrow_mut().overlay_clicked(direct)
            };
            host.apply(effects);
        })?;

        Ok(())
    }

    fn is_button(&self, event: &Event) -> bool {
        is_target(event, &self.button)
    }

    fn apply(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            if let Err(e) = self.apply_one(effect) {
                log::warn!("applying page effect failed: {}", chrome::describe_js(&e));
            }
        }
    }

    fn apply_one(self: &Rc<Self>, effect: Effect) -> Result<(), JsValue> {
        match effect {
            Effect::ScheduleSelectionCheck => {
                let host = Rc::clone(self);
                spawn_local(async move {
                    TimeoutFuture::new(SETTLE_DELAY_MS).await;
                    host.check_selection();
                });
            }
            Effect::ShowButton(anchor) => {
                let style = self.button.style();
                // Display first so the button has a measurable width.
                style.set_property("display", "block")?;
                let position = button_position(anchor, f64::from(self.button.offset_width()));
                style.set_property("top", &format!("{}px", position.top))?;
                style.set_property("left", &format!("{}px", position.left))?;
            }
            Effect::HideButton => self.button.style().set_property("display", "none")?,
            Effect::ShowModal(html) => {
                self.modal.set_inner_html(&html);
                if !self.overlay.is_connected() {
                    self.body.append_child(&self.overlay)?;
                }
                self.body.style().set_property("overflow", "hidden")?;
            }
            Effect::CloseModal => {
                self.overlay.remove();
                self.modal.set_inner_html("");
                self.body.style().set_property("overflow", "")?;
            }
            Effect::SendRequest { flow, text } => self.send_request(flow, text),
        }
        Ok(())
    }

    fn check_selection(self: &Rc<Self>) {
        let (text, anchor) = match read_selection() {
            Ok(selection) => selection.unwrap_or_default(),
            Err(e) => {
                log::warn!("reading selection failed: {}", chrome::describe_js(&e));
                return;
            }
        };
        let effects = self.controller.borrow_mut().selection_settled(&text, anchor);
        self.apply(effects);
    }

    fn send_request(self: &Rc<Self>, flow: FlowId, text: String) {
        let host = Rc::clone(self);
        spawn_local(async move {
            let message = RuntimeMessage::ExplainText(ExplanationRequest::new(text));
            let result = match chrome::send_message(&message).await {
                Ok(result) => result,
                Err(e) => {
                    log::error!("explain request did not reach the worker: {e}");
                    ExplanationResult::failure(render::EXTENSION_ERROR_MESSAGE)
                }
            };
            let effects = host.controller.borrow_mut().result_arrived(flow, &result);
            host.apply(effects);
        });
    }
}
