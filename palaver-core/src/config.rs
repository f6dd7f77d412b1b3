//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/palaver/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/palaver/` (~/.config/palaver/)
//! - State/Logs: `$XDG_STATE_HOME/palaver/` (~/.local/state/palaver/)

use crate::catalog::ChatModelsResponse;
use crate::error::{Error, Result};
use crate::model::ModelSelector;
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Chat interface configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat interface configuration
#[derive(Debug, Deserialize)]
pub struct ChatConfig {
    /// LLM provider ids the catalog keeps buckets for
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,

    /// Model token to preselect for new conversations
    /// (`provider::identifier`)
    pub default_model: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            default_model: None,
        }
    }
}

fn default_providers() -> Vec<String> {
    ["anthropic", "openai", "ollama", "google"]
        .map(String::from)
        .to_vec()
}

impl ChatConfig {
    /// Resolve the configured default model token, if present and valid.
    pub fn default_selector(&self) -> Option<ModelSelector> {
        self.default_model
            .as_deref()
            .and_then(ModelSelector::from_token)
    }

    /// The empty catalog response for this configuration: one bucket per
    /// known provider plus the reserved workflow and custom-agent buckets.
    pub fn empty_models(&self) -> ChatModelsResponse {
        ChatModelsResponse::empty_with_providers(&self.providers)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if let Some(token) = self.chat.default_model.as_deref() {
            if ModelSelector::from_token(token).is_none() {
                return Err(Error::Config(format!(
                    "chat.default_model is not a valid model token: {}",
                    token
                )));
            }
        }
        if self.chat.providers.iter().any(|p| p.is_empty()) {
            return Err(Error::Config(
                "chat.providers must not contain empty provider ids".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/palaver/config.toml` (~/.config/palaver/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("palaver").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/palaver/` (~/.local/state/palaver/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("palaver")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/palaver/palaver.log` (~/.local/state/palaver/palaver.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("palaver.log")
    }
}
