//! `chrome.*` extension API bindings.
//!
//! Thin `wasm-bindgen` imports for the handful of extension APIs the three
//! contexts use, plus the `chrome.storage.sync` [`KeyStore`]. Values cross the
//! JS boundary as JSON text through `JSON.parse` / `JSON.stringify`, so every
//! payload goes through the same serde types as the native build.

use js_sys::{Array, JSON, Object, Reflect};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::keystore::{CREDENTIAL_STORAGE_KEY, Credential, KeyStore, StorageError};
use crate::message::{ExplanationResult, RuntimeMessage};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = get)]
    async fn storage_sync_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = set)]
    async fn storage_sync_set(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    async fn runtime_send_message(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "action"], js_name = openPopup)]
    async fn action_open_popup() -> Result<JsValue, JsValue>;
}

// =============================================================================
// ERROR
// =============================================================================

/// Errors crossing the JS boundary.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A browser API threw or rejected.
    #[error("extension API failed: {0}")]
    Js(String),

    /// A value could not be converted between JS and Rust.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),

    /// `JSON.stringify` produced no text (e.g. `undefined`).
    #[error("value is not JSON-serializable")]
    NotJson,
}

impl From<JsValue> for BridgeError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe_js(&value))
    }
}

/// Best-effort text for a thrown JS value.
#[must_use]
pub fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

// =============================================================================
// JSON BRIDGE
// =============================================================================

/// Convert a serde value into a plain JS object.
///
/// # Errors
///
/// Returns [`BridgeError`] if serialization or `JSON.parse` fails.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, BridgeError> {
    let text = serde_json::to_string(value)?;
    Ok(JSON::parse(&text)?)
}

/// Convert a plain JS object into a serde value.
///
/// # Errors
///
/// Returns [`BridgeError`] if `JSON.stringify` or deserialization fails.
pub fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, BridgeError> {
    let text = JSON::stringify(value)?.as_string().ok_or(BridgeError::NotJson)?;
    Ok(serde_json::from_str(&text)?)
}

// =============================================================================
// RUNTIME
// =============================================================================

/// Send one message to the background worker and await its single reply.
///
/// # Errors
///
/// Returns [`BridgeError`] if the runtime rejects the message or the reply is
/// not a valid [`ExplanationResult`].
pub async fn send_message(message: &RuntimeMessage) -> Result<ExplanationResult, BridgeError> {
    let reply = runtime_send_message(to_js(message)?).await?;
    from_js(&reply)
}

/// Open the extension's action popup.
///
/// # Errors
///
/// Returns [`BridgeError`] if the browser refuses (e.g. no active window).
pub async fn open_popup() -> Result<(), BridgeError> {
    action_open_popup().await?;
    Ok(())
}

// =============================================================================
// STORAGE
// =============================================================================

/// Credential store backed by `chrome.storage.sync` (synced across the
/// user's browser profile instances).
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncKeyStore;

fn storage_error(value: JsValue) -> StorageError {
    StorageError::Backend(describe_js(&value))
}

#[async_trait::async_trait(?Send)]
impl KeyStore for SyncKeyStore {
    async fn get(&self) -> Result<Option<Credential>, StorageError> {
        let key = JsValue::from_str(CREDENTIAL_STORAGE_KEY);
        let items = storage_sync_get(Array::of1(&key).into())
            .await
            .map_err(storage_error)?;
        let value = Reflect::get(&items, &key).map_err(storage_error)?;
        Ok(value.as_string().as_deref().and_then(Credential::parse))
    }

    async fn set(&self, credential: &Credential) -> Result<(), StorageError> {
        let items = Object::new();
        Reflect::set(
            &items,
            &JsValue::from_str(CREDENTIAL_STORAGE_KEY),
            &JsValue::from_str(credential.as_str()),
        )
        .map_err(storage_error)?;
        storage_sync_set(items.into()).await.map_err(storage_error)?;
        Ok(())
    }
}
