mod catalog_cmd;
mod config;
mod generate_cmd;
mod project_args;
mod prompt_cmd;
mod suggest_cmd;
mod tui;

#[cfg(test)]
mod test_util;

use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use espforge_core::{GeminiClient, Locale};

use config::EspforgeConfig;
use project_args::ProjectArgs;

#[derive(Parser)]
#[command(
    name = "espforge",
    version,
    about = "Generate ESP32 hardware project plans with an LLM"
)]
struct Cli {
    /// Model name (overrides ESPFORGE_MODEL env var)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Language the plan is written in (e.g. English, Persian)
    #[arg(long, global = true)]
    response_language: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive form (default)
    Tui,
    /// Generate one project plan and print it
    Generate {
        #[command(flatten)]
        project: ProjectArgs,
        /// Print the model's response unparsed
        #[arg(long)]
        raw: bool,
    },
    /// Suggest one creative project title
    Suggest,
    /// Print the plan prompt without sending it (no API key needed)
    Prompt {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// List the built-in boards, goals, components and communication options
    Catalog,
    /// Write an espforge config file
    Init {
        /// Gemini API key to store
        #[arg(long)]
        api_key: Option<String>,
        /// Locale for interface messages: en or fa
        #[arg(long)]
        locale: Option<Locale>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the `espforge init` command: write config file.
fn cmd_init(
    api_key: Option<String>,
    model: Option<String>,
    response_language: Option<String>,
    locale: Option<Locale>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let masked_key = api_key.as_deref().map(mask_key);
    let cfg = config::ConfigFile {
        api: config::ApiSection {
            key: api_key,
            model,
            base_url: None,
        },
        output: config::OutputSection {
            response_language,
            locale,
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    match masked_key {
        Some(masked) => println!("  api.key = {masked}"),
        None => println!("  api.key not set; export ESPFORGE_API_KEY or GEMINI_API_KEY"),
    }
    if let Some(model) = &cfg.api.model {
        println!("  api.model = {model}");
    }
    if let Some(language) = &cfg.output.response_language {
        println!("  output.response_language = {language}");
    }
    if let Some(locale) = &cfg.output.locale {
        println!("  output.locale = {locale}");
    }

    Ok(())
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to a file while the TUI owns the terminal.
fn init_file_logging() -> anyhow::Result<()> {
    let dir = config::config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    let path = config::log_path();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    if matches!(command, Commands::Tui) {
        init_file_logging()?;
    } else {
        init_stderr_logging();
    }

    match command {
        Commands::Init {
            api_key,
            locale,
            force,
        } => {
            cmd_init(api_key, cli.model, cli.response_language, locale, force)?;
        }
        Commands::Catalog => {
            catalog_cmd::run_catalog();
        }
        Commands::Prompt { project } => {
            let resolved = EspforgeConfig::resolve(None, cli.response_language.as_deref())?;
            prompt_cmd::run_prompt(&resolved, project);
        }
        Commands::Suggest => {
            let resolved =
                EspforgeConfig::resolve(cli.model.as_deref(), cli.response_language.as_deref())?;
            suggest_cmd::run_suggest(&resolved).await?;
        }
        Commands::Generate { project, raw } => {
            let resolved =
                EspforgeConfig::resolve(cli.model.as_deref(), cli.response_language.as_deref())?;
            generate_cmd::run_generate(&resolved, project, raw).await?;
        }
        Commands::Tui => {
            let resolved =
                EspforgeConfig::resolve(cli.model.as_deref(), cli.response_language.as_deref())?;
            // Fail before entering the alternate screen so the message is visible.
            let client = GeminiClient::new(resolved.gemini()?);
            tui::run_tui(
                Arc::new(client),
                &resolved.response_language,
                resolved.locale,
            )
            .await?;
        }
    }

    Ok(())
}
