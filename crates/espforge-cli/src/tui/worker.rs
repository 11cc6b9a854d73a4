//! Background request runner for the TUI.
//!
//! Each request runs on its own tokio task and reports back over an mpsc
//! channel as a ready-made [`Action`]. The event loop drains the channel
//! with [`RequestWorker::try_recv`] between frames, so the terminal never
//! blocks on the network.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use espforge_core::{Action, ProjectConfig, TextGenerator, generate_plan, suggest_idea};

const CHANNEL_CAPACITY: usize = 16;

pub struct RequestWorker {
    generator: Arc<dyn TextGenerator>,
    response_language: String,
    action_tx: mpsc::Sender<Action>,
    action_rx: mpsc::Receiver<Action>,
}

impl RequestWorker {
    pub fn new(generator: Arc<dyn TextGenerator>, response_language: impl Into<String>) -> Self {
        let (action_tx, action_rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            generator,
            response_language: response_language.into(),
            action_tx,
            action_rx,
        }
    }

    /// Start a suggestion request. The caller has already recorded
    /// `SuggestStarted`.
    pub fn suggest(&self) {
        let generator = Arc::clone(&self.generator);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match suggest_idea(generator.as_ref()).await {
                Ok(idea) => Action::SuggestSucceeded(idea),
                Err(_) => Action::SuggestFailed,
            };
            if tx.send(action).await.is_err() {
                warn!("suggestion finished after the UI closed");
            }
        });
    }

    /// Start a plan request for a snapshot of the configuration. The caller
    /// has already recorded `GenerateStarted`.
    pub fn generate(&self, config: ProjectConfig) {
        let generator = Arc::clone(&self.generator);
        let response_language = self.response_language.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action =
                match generate_plan(generator.as_ref(), &config, &response_language).await {
                    Ok(plan) => Action::GenerateSucceeded(plan),
                    Err(_) => Action::GenerateFailed,
                };
            if tx.send(action).await.is_err() {
                warn!("plan finished after the UI closed");
            }
        });
    }

    /// Next finished request, if any. Never blocks.
    pub fn try_recv(&mut self) -> Option<Action> {
        self.action_rx.try_recv().ok()
    }
}
