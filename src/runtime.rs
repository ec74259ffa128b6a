//! Service worker runtime.
//!
//! `background.js` registers the `chrome.runtime` listeners synchronously on
//! first evaluation and forwards each event here once the module is ready:
//! [`handle_message`] answers every `explainText` message exactly once, and
//! [`handle_installed`] applies the [`InstallPolicy`]. The worker holds no
//! state besides the explainer itself; the credential is re-read from
//! `chrome.storage.sync` on every request.

use std::cell::OnceCell;
use std::rc::Rc;

use common::ExplanationResult;
use common::chrome::{self, SyncKeyStore};
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;

use crate::config::{ExplainerConfig, InstallPolicy};
use crate::error::ExplainError;
use crate::llm::GeminiClient;
use crate::services::dispatch::is_explain_action;
use crate::services::explain::Explainer;
use crate::services::install::{InstallDetails, should_open_popup};

type WorkerExplainer = Explainer<SyncKeyStore, GeminiClient>;

#[derive(Clone)]
struct Worker {
    explainer: Rc<WorkerExplainer>,
    install: InstallPolicy,
}

thread_local! {
    static WORKER: OnceCell<Worker> = const { OnceCell::new() };
}

fn worker() -> Option<Worker> {
    WORKER.with(|cell| cell.get().cloned())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // Only fails if the worker script is evaluated twice; the first logger stays.
        warn!(error = %e, "console logger already installed");
    }

    let config = ExplainerConfig::default();
    let client = match GeminiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to build provider client; explain requests disabled");
            return;
        }
    };

    info!(model = %config.model, "text explainer worker starting");
    let worker = Worker { explainer: Rc::new(Explainer::new(SyncKeyStore, client)), install: config.install };
    WORKER.with(|cell| {
        if cell.set(worker).is_err() {
            warn!("worker already initialized");
        }
    });
}

/// Answer one `chrome.runtime.onMessage` payload.
///
/// Resolves to the [`ExplanationResult`] object for `explainText` messages
/// and to `undefined` for messages addressed elsewhere.
///
/// # Errors
///
/// Rejects only if the result cannot be converted to a JS object.
#[wasm_bindgen(js_name = handleMessage)]
pub async fn handle_message(message: JsValue) -> Result<JsValue, JsValue> {
    let message = match chrome::from_js::<serde_json::Value>(&message) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "unreadable runtime message");
            return reply(&unexpected(format!("unreadable runtime message: {e}")));
        }
    };

    let result = match worker() {
        Some(worker) => worker.explainer.handle_message(message).await,
        None if is_explain_action(&message) => {
            Some(unexpected("worker not initialized".to_owned()))
        }
        None => None,
    };

    match result {
        Some(result) => reply(&result),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Apply the install policy to one `chrome.runtime.onInstalled` payload.
#[wasm_bindgen(js_name = handleInstalled)]
pub async fn handle_installed(details: JsValue) {
    let details = match chrome::from_js::<InstallDetails>(&details) {
        Ok(details) => details,
        Err(e) => {
            warn!(error = %e, "unreadable install details");
            return;
        }
    };

    let policy = worker().map_or_else(InstallPolicy::default, |worker| worker.install);
    if should_open_popup(details.reason, policy) {
        info!("text explainer installed; opening configuration popup");
        if let Err(e) = chrome::open_popup().await {
            warn!(error = %e, "could not open popup after install");
        }
    } else {
        info!(
            reason = ?details.reason,
            previous_version = details.previous_version_label(),
            "install event ignored"
        );
    }
}

fn unexpected(detail: String) -> ExplanationResult {
    ExplanationResult::failure(ExplainError::UnknownFailure(detail).to_string())
}

fn reply(result: &ExplanationResult) -> Result<JsValue, JsValue> {
    chrome::to_js(result).map_err(|e| {
        error!(error = %e, "failed to encode explanation result");
        JsValue::from_str(&e.to_string())
    })
}
