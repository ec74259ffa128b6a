//! LLM: Gemini `generateContent` adapter.
//!
//! DESIGN
//! ======
//! One provider, one call shape: a single prompt in, the first candidate's
//! text out. The [`LlmGenerate`] trait is the seam the explanation service
//! depends on, so tests swap in a mock and never touch the network.

pub mod gemini;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{LlmError, LlmGenerate};
