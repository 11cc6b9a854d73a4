//! `espforge generate`: request one plan and print it.

use anyhow::{Context, Result};

use espforge_core::sections::{self, PlanView};
use espforge_core::{Catalog, GeminiClient, Messages, generate_plan};

use crate::config::EspforgeConfig;
use crate::project_args::ProjectArgs;

pub async fn run_generate(resolved: &EspforgeConfig, project: ProjectArgs, raw: bool) -> Result<()> {
    let catalog = Catalog::builtin();
    let config = project.into_config(&catalog);
    let client = GeminiClient::new(resolved.gemini()?);
    let messages = Messages::for_locale(resolved.locale);

    let plan = generate_plan(&client, &config, &resolved.response_language)
        .await
        .context(messages.generate_failed)?;

    if raw {
        println!("{plan}");
        return Ok(());
    }

    let view = sections::render(&plan);
    if let PlanView::Unstructured { .. } = view {
        eprintln!("{}", messages.no_sections);
    }
    print!("{}", view.to_plain_text());
    Ok(())
}
