//! # text-explainer
//!
//! Background worker of the text-explainer browser extension. Compiled to
//! WebAssembly (with the `web` feature) it runs as the extension's service
//! worker: the only context that holds the API key and talks to the
//! provider. Page scripts and the popup reach it through one runtime message,
//! `explainText`, and always get exactly one result back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Endpoint, model, generation parameters, install policy |
//! | [`error`] | Error taxonomy and HTTP status classification |
//! | [`llm`] | Gemini `generateContent` client behind the `LlmGenerate` seam |
//! | [`services`] | Message routing, explanation requester and install hook |
//! | `runtime` | wasm exports called by the `chrome.runtime` listeners (`web` only) |

pub mod config;
pub mod error;
pub mod llm;
pub mod services;

#[cfg(feature = "web")]
mod runtime;

pub use config::ExplainerConfig;
pub use error::{ExplainError, classify_http_error};
pub use services::explain::Explainer;
