//! Configuration handling for PlanWise
//!
//! Configuration is stored in `~/.config/planwise/config.toml`. Everything
//! has a working default, so a missing file is not an error; the AI
//! features additionally need an API key in the environment.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("API key not set: export {0} to enable AI features")]
    MissingApiKey(String),
}

/// Output format for one-shot commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for the AI backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model identifier sent to the API
    pub model: String,

    /// Base URL of the API endpoint
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Maximum output tokens per response
    pub max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_ms: 30_000,
            max_tokens: 1024,
        }
    }
}

impl AiConfig {
    /// Reads the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(self.api_key_env.clone()))
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default output format for one-shot commands (text or json)
    pub default_format: OutputFormat,

    /// AI backend settings
    pub ai: AiConfig,
}

impl Config {
    /// Loads configuration from the default location, falling back to
    /// defaults when no file exists
    pub fn load() -> Result<Self> {
        let config_path = match Self::config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Ok(Self::default()),
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")
    }

    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "planwise", "planwise").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Saves the configuration
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.default_format, OutputFormat::Text);
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.ai.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn parse_config() {
        let toml = r#"
default_format = "json"

[ai]
model = "gemini-1.5-pro"
timeout_ms = 5000
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.ai.model, "gemini-1.5-pro");
        assert_eq!(config.ai.timeout_ms, 5000);
        // Unspecified fields keep their defaults.
        assert_eq!(config.ai.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn roundtrip_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.ai.base_url, config.ai.base_url);
        assert_eq!(parsed.ai.max_tokens, config.ai.max_tokens);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let ai = AiConfig {
            api_key_env: "PLANWISE_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..AiConfig::default()
        };
        assert!(matches!(
            ai.get_api_key(),
            Err(ConfigError::MissingApiKey(_))
        ));
    }
}
