//! Popup host.
//!
//! Binds the settings form (`#apiKey`, `#saveKey`, `#testKey`, `#toggleKey`,
//! `#status`) to a [`PopupController`]. Storage goes straight to
//! `chrome.storage.sync`; the connectivity test goes through the worker like
//! any other explain request.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::chrome::{self, SyncKeyStore};
use common::{KeyStore, RuntimeMessage};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::popup::{PopupController, STATUS_BASE_CLASS, STATUS_CLEAR_MS};

struct PopupHost {
    controller: RefCell<PopupController>,
    store: SyncKeyStore,
    input: HtmlInputElement,
    save_button: HtmlButtonElement,
    test_button: HtmlButtonElement,
    toggle_button: HtmlButtonElement,
    status: HtmlElement,
    /// Serial of the last status an expiry timer was armed for.
    armed: Cell<Option<u64>>,
}

/// Bind the form and load the stored key.
pub fn attach() -> Result<(), JsValue> {
    let document = super::document()?;
    let host = Rc::new(PopupHost {
        controller: RefCell::new(PopupController::new()),
        store: SyncKeyStore,
        input: super::by_id(&document, "apiKey")?,
        save_button: super::by_id(&document, "saveKey")?,
        test_button: super::by_id(&document, "testKey")?,
        toggle_button: super::by_id(&document, "toggleKey")?,
        status: super::by_id(&document, "status")?,
        armed: Cell::new(None),
    });
    host.bind()?;
    host.render();
    host.load();
    Ok(())
}

impl PopupHost {
    fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        let host = Rc::clone(self);
        super::listen(&self.save_button, "click", move |_| host.save())?;

        let host = Rc::clone(self);
        super::listen(&self.test_button, "click", move |_| host.test())?;

        let host = Rc::clone(self);
        super::listen(&self.toggle_button, "click", move |_| {
            host.controller.borrow_mut().toggle_visibility();
            host.render();
        })?;

        let host = Rc::clone(self);
        super::listen(&self.input, "input", move |_| {
            host.controller.borrow_mut().input_changed();
            host.render();
        })?;

        let host = Rc::clone(self);
        super::listen(&self.input, "keypress", move |event| {
            if event.dyn_ref::<KeyboardEvent>().is_some_and(|e| e.key() == "Enter") {
                host.save();
            }
        })?;

        Ok(())
    }

    fn load(self: &Rc<Self>) {
        let host = Rc::clone(self);
        spawn_local(async move {
            let result = host.store.get().await;
            let prefill = host.controller.borrow_mut().loaded(result);
            if let Some(value) = prefill {
                host.input.set_value(&value);
            }
            host.render();
        });
    }

    fn save(self: &Rc<Self>) {
        let credential = self.controller.borrow_mut().save_requested(&self.input.value());
        self.render();
        let Some(credential) = credential else {
            return;
        };

        let host = Rc::clone(self);
        spawn_local(async move {
            let result = host.store.set(&credential).await;
            if result.is_ok() {
                log::info!("API key saved");
            }
            host.controller.borrow_mut().saved(result);
            host.render();
        });
    }

    fn test(self: &Rc<Self>) {
        let request = self.controller.borrow_mut().test_requested(&self.input.value());
        self.render();
        let Some(request) = request else {
            return;
        };

        let host = Rc::clone(self);
        spawn_local(async move {
            let outcome = chrome::send_message(&RuntimeMessage::ExplainText(request)).await;
            host.controller.borrow_mut().test_finished(outcome);
            host.render();
        });
    }

    /// Copy controller state into the form and arm the status expiry.
    fn render(self: &Rc<Self>) {
        let (status, visibility, testing, expiry) = {
            let controller = self.controller.borrow();
            (
                controller.status().cloned(),
                controller.visibility(),
                controller.is_testing(),
                controller.pending_expiry(),
            )
        };

        match status {
            Some(status) => {
                self.status.set_text_content(Some(&status.message));
                self.status.set_class_name(&status.class_name());
            }
            None => {
                self.status.set_text_content(None);
                self.status.set_class_name(STATUS_BASE_CLASS);
            }
        }
        self.input.set_type(visibility.input_type());
        self.toggle_button.set_text_content(Some(visibility.toggle_icon()));
        self.test_button.set_disabled(testing);

        if let Some(serial) = expiry {
            if self.armed.get() != Some(serial) {
                self.armed.set(Some(serial));
                self.arm_expiry(serial);
            }
        }
    }

    fn arm_expiry(self: &Rc<Self>, serial: u64) {
        let host = Rc::clone(self);
        spawn_local(async move {
            TimeoutFuture::new(STATUS_CLEAR_MS).await;
            host.controller.borrow_mut().expire_status(serial);
            host.render();
        });
    }
}
