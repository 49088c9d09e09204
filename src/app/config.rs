use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_SERVICE_URL, HTTP_REQUEST_TIMEOUT_SECS, SUGGESTED_QUESTIONS};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Answer service connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Assistant presentation settings
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

/// Answer service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the question-answering endpoint
    pub base_url: String,
    /// Transport timeout for a single request, in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Assistant presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Quick questions offered above the prompt
    pub suggested_questions: Vec<String>,
    /// Render citation labels under answers
    pub show_sources: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            suggested_questions: SUGGESTED_QUESTIONS
                .iter()
                .map(|q| q.to_string())
                .collect(),
            show_sources: true,
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir()?;
    let global_config = config_dir.join("config.toml");
    let local_config = PathBuf::from(".schemesconnect/config.toml");

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    // Environment variables (e.g. SCHEMESCONNECT_SERVICE__BASE_URL)
    figment = figment.merge(Env::prefixed("SCHEMESCONNECT_").split("__"));

    figment.extract().context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "schemesconnect") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("schemesconnect");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        let default_config = Config::default();
        save_config(&default_config, Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    }

    // Create example local config
    let local_example = PathBuf::from(".schemesconnect/config.toml.example");
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# SchemesConnect Project Configuration
# This file overrides global settings for this directory

[service]
base_url = "http://localhost:8000"
timeout_secs = 30

[assistant]
show_sources = true
suggested_questions = [
    "What schemes are available for students?",
    "How to apply for a pension?",
]
"#;
        std::fs::write(&local_example, example_config)?;
        println!("Created example configuration at: {}", local_example.display());
    }

    Ok(())
}
