//! Configuration file management for espforge.
//!
//! Provides a TOML-based config file at `~/.config/espforge/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::warn;

use espforge_core::{GeminiConfig, Locale};

/// Response language used when neither the CLI nor the file sets one.
pub const DEFAULT_RESPONSE_LANGUAGE: &str = "English";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// Natural language the model is asked to answer in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_language: Option<String>,
    /// Locale for the interface's own messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the espforge config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/espforge` or `~/.config/espforge`,
/// on every platform.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("espforge");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("espforge")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Where the TUI writes its log, since stderr is covered by the screen.
pub fn log_path() -> PathBuf {
    config_dir().join("espforge.log")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Load the config file for resolution. A missing file means defaults; a
/// file that exists but cannot be read or parsed is logged and skipped.
fn load_config_or_default() -> ConfigFile {
    let path = config_path();
    if !path.exists() {
        return ConfigFile::default();
    }
    match load_config() {
        Ok(config) => config,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %format!("{err:#}"),
                "ignoring unreadable config file"
            );
            ConfigFile::default()
        }
    }
}

/// Serialize and write the config file, creating parent dirs as needed.
/// The file holds the API key, so it is written owner-only (0600) on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

/// Read an env var, treating an empty value as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
///
/// The API key stays optional here: commands that never touch the network
/// (`prompt`, `catalog`) must work without one. Everything else goes
/// through [`EspforgeConfig::gemini`], which fails when it is missing.
pub struct EspforgeConfig {
    api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub response_language: String,
    pub locale: Locale,
}

impl EspforgeConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - API key: `ESPFORGE_API_KEY` env > `GEMINI_API_KEY` env > `api.key`
    /// - Model: `cli_model` > `ESPFORGE_MODEL` env > `api.model` > `GeminiConfig::DEFAULT_MODEL`
    /// - Base URL: `ESPFORGE_API_BASE` env > `api.base_url` > `GeminiConfig::DEFAULT_BASE_URL`
    /// - Response language: `cli_response_language` > `output.response_language` > `English`
    /// - Locale: `output.locale` > `en`
    pub fn resolve(cli_model: Option<&str>, cli_response_language: Option<&str>) -> Result<Self> {
        let file_config = load_config_or_default();

        let api_key = env_var("ESPFORGE_API_KEY")
            .or_else(|| env_var("GEMINI_API_KEY"))
            .or(file_config.api.key);

        let model = cli_model
            .map(str::to_string)
            .or_else(|| env_var("ESPFORGE_MODEL"))
            .or(file_config.api.model)
            .unwrap_or_else(|| GeminiConfig::DEFAULT_MODEL.to_string());

        let base_url = env_var("ESPFORGE_API_BASE")
            .or(file_config.api.base_url)
            .unwrap_or_else(|| GeminiConfig::DEFAULT_BASE_URL.to_string());

        let response_language = cli_response_language
            .map(str::to_string)
            .or(file_config.output.response_language)
            .unwrap_or_else(|| DEFAULT_RESPONSE_LANGUAGE.to_string());

        let locale = file_config.output.locale.unwrap_or_default();

        Ok(Self {
            api_key,
            model,
            base_url,
            response_language,
            locale,
        })
    }

    /// Client settings for the Gemini API. Errors when no key was found.
    pub fn gemini(&self) -> Result<GeminiConfig> {
        let Some(api_key) = self.api_key.clone() else {
            bail!(
                "API key not found; set ESPFORGE_API_KEY (or GEMINI_API_KEY) or run `espforge init --api-key <KEY>`"
            );
        };
        Ok(GeminiConfig {
            api_key,
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
