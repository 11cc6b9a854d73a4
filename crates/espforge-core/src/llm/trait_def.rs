//! The `TextGenerator` trait -- the seam between the services and a
//! concrete model API.
//!
//! The trait is object-safe so the UI can hold an `Arc<dyn TextGenerator>`
//! and hand it to background tasks.

use async_trait::async_trait;

use super::LlmError;

/// A backend that turns one prompt into one complete text response.
///
/// There is no streaming and no conversation state: each call is
/// independent and either yields the whole response or an error.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send `prompt` and wait for the full response text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

// Compile-time assertion: TextGenerator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn TextGenerator) {}
};
