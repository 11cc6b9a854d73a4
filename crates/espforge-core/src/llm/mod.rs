//! Text-generation transport.
//!
//! This module defines the [`TextGenerator`] trait every backend
//! implements, the shared [`LlmError`] type, and the [`GeminiClient`]
//! adapter for Google's `generateContent` endpoint.
//!
//! # Architecture
//!
//! ```text
//! service::suggest_idea / service::generate_plan
//!     |
//!     v
//! &dyn TextGenerator --generate(prompt)--> Result<String, LlmError>
//!     |
//!     v
//! GeminiClient  POST {base_url}/models/{model}:generateContent
//! ```

pub mod gemini;
pub mod trait_def;

use thiserror::Error;

pub use gemini::{GeminiClient, GeminiConfig};
pub use trait_def::TextGenerator;

/// Errors from a single generation call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no text")]
    EmptyResponse,

    #[error("API rejected the request: {0}")]
    Api(String),
}
