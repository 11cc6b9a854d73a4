//! `espforge prompt`: print the plan prompt without sending it.

use espforge_core::{Catalog, build_plan_prompt};

use crate::config::EspforgeConfig;
use crate::project_args::ProjectArgs;

pub fn run_prompt(resolved: &EspforgeConfig, project: ProjectArgs) {
    let catalog = Catalog::builtin();
    let config = project.into_config(&catalog);
    print!("{}", build_plan_prompt(&config, &resolved.response_language));
}
