//! Shared model for the text-explainer extension.
//!
//! This crate owns everything that crosses a context boundary: the runtime
//! message exchanged between the page (or popup) and the background worker,
//! the explanation request/result value objects, and the credential store
//! contract. With the `web` feature it also carries the `chrome.*` bindings
//! used by every extension context.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`message`] | Runtime message and result wire types |
//! | [`keystore`] | `Credential`, the `KeyStore` trait and an in-memory store |
//! | `chrome` | `chrome.runtime` / `chrome.storage` bindings (`web` only) |

pub mod keystore;
pub mod message;

#[cfg(feature = "web")]
pub mod chrome;

pub use keystore::{CREDENTIAL_STORAGE_KEY, Credential, KeyStore, MemoryKeyStore, StorageError};
pub use message::{EXPLAIN_TEXT_ACTION, ExplanationRequest, ExplanationResult, MAX_SELECTION_CHARS, RuntimeMessage};
