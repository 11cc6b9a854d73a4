//! The two request flows: project-title suggestion and plan generation.
//!
//! Each flow is one call to a [`TextGenerator`]. Failures are logged here,
//! where they are caught, and collapsed into a generic [`ServiceError`];
//! callers show a short localized message and never the underlying detail.

use thiserror::Error;
use tracing::{debug, error, info};

use crate::llm::{LlmError, TextGenerator};
use crate::project::ProjectConfig;
use crate::prompt::{SUGGESTION_PROMPT, build_plan_prompt};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("idea generation failed")]
    IdeaGenerationFailed(#[source] LlmError),

    #[error("plan generation failed")]
    PlanGenerationFailed(#[source] LlmError),
}

/// Strip quotation marks and asterisks, then surrounding whitespace.
pub fn clean_idea(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '"' && *c != '*')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Ask for one short project title.
///
/// Returns the cleaned title, which may be empty; deciding whether to use
/// it is up to the caller.
pub async fn suggest_idea(generator: &dyn TextGenerator) -> Result<String, ServiceError> {
    debug!(backend = generator.name(), "requesting project idea");
    match generator.generate(SUGGESTION_PROMPT).await {
        Ok(raw) => {
            let idea = clean_idea(&raw);
            info!(idea = %idea, "project idea received");
            Ok(idea)
        }
        Err(e) => {
            error!(error = %e, "error generating project idea");
            Err(ServiceError::IdeaGenerationFailed(e))
        }
    }
}

/// Generate a full project plan for `config`.
///
/// All or nothing: the raw response text on success, otherwise an error
/// and no partial result.
pub async fn generate_plan(
    generator: &dyn TextGenerator,
    config: &ProjectConfig,
    response_language: &str,
) -> Result<String, ServiceError> {
    let prompt = build_plan_prompt(config, response_language);
    debug!(
        backend = generator.name(),
        prompt_chars = prompt.chars().count(),
        board = %config.board,
        language = %config.language,
        "requesting project plan"
    );
    match generator.generate(&prompt).await {
        Ok(plan) => {
            info!(plan_chars = plan.chars().count(), "project plan received");
            Ok(plan)
        }
        Err(e) => {
            error!(error = %e, "error generating project plan");
            Err(ServiceError::PlanGenerationFailed(e))
        }
    }
}
