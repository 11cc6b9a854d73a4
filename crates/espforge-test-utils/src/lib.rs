//! Shared test utilities for espforge integration tests.
//!
//! Provides a scripted [`TextGenerator`] that replays queued results and
//! records every prompt it is sent, plus a few fixtures.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use espforge_core::{Catalog, LlmError, ProjectConfig, TextGenerator};

// ---------------------------------------------------------------------------
// ScriptedGenerator
// ---------------------------------------------------------------------------

/// A [`TextGenerator`] that answers from a queue.
///
/// Each call pops the next queued result. Once the queue is empty every
/// call fails with [`LlmError::Api`], so a test that makes more requests
/// than it scripted fails loudly instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that answers its first call with `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        let generator = Self::new();
        generator.push_ok(text);
        generator
    }

    /// Generator whose first call fails.
    pub fn failing(message: impl Into<String>) -> Self {
        let generator = Self::new();
        generator.push_err(LlmError::Api(message.into()));
        generator
    }

    pub fn push_ok(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(Ok(text.into()));
    }

    pub fn push_err(&self, err: LlmError) {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(Err(err));
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().expect("prompts lock poisoned").len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .expect("prompts lock poisoned")
            .push(prompt.to_string());
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Api("no scripted response left".to_string())))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// The default configuration built from the embedded catalog.
pub fn sample_config() -> ProjectConfig {
    ProjectConfig::from_catalog(&Catalog::builtin())
}

/// A well-formed plan with the six expected sections, code fenced.
pub fn six_section_plan() -> String {
    [
        "Here is your project plan.",
        "",
        "### 1. Detailed Functional Description",
        "The board reads a button and toggles an LED.",
        "It also reports the state over WiFi.",
        "",
        "### 2. Pinout Table (Connections)",
        "| Component | Pin | GPIO |",
        "|---|---|---|",
        "| LED | Anode | GPIO 2 |",
        "",
        "### 3. Text Schematic of the Circuit",
        "```text",
        "GPIO2 ---[220R]---|>|--- GND",
        "```",
        "",
        "### 4. Full Project Code",
        "```cpp",
        "void setup() { pinMode(2, OUTPUT); }",
        "void loop() {}",
        "```",
        "",
        "### 5. Important Notes",
        "Avoid GPIO 6-11.",
        "",
        "### 6. Upgrade Suggestions",
        "Add an OLED display.",
    ]
    .join("\n")
}
