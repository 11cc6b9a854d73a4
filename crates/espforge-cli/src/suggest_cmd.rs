//! `espforge suggest`: ask for one project title.

use anyhow::{Context, Result};

use espforge_core::{GeminiClient, Messages, suggest_idea};

use crate::config::EspforgeConfig;

pub async fn run_suggest(resolved: &EspforgeConfig) -> Result<()> {
    let client = GeminiClient::new(resolved.gemini()?);
    let messages = Messages::for_locale(resolved.locale);

    let idea = suggest_idea(&client)
        .await
        .context(messages.suggest_failed)?;

    // An empty title is not an error; there is just nothing to print.
    if !idea.is_empty() {
        println!("{idea}");
    }
    Ok(())
}
