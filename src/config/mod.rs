#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const PINECONE_API_KEY_VAR: &str = "PINECONE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub pinecone: PineconeConfig,
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key; falls back to the `OPENAI_API_KEY` environment variable when empty.
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-ada-002".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PineconeConfig {
    /// API key; falls back to the `PINECONE_API_KEY` environment variable when empty.
    pub api_key: String,
    /// Full host URL of the Pinecone index, e.g. `https://my-index.svc.us-east-1.pinecone.io`.
    pub index_host: String,
    pub timeout_seconds: u64,
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            index_host: String::new(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found or could not be created")]
    DirectoryError,
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Invalid model name: {0} (cannot be empty)")]
    InvalidModel(String),
    #[error("Pinecone index host is not configured")]
    MissingIndexHost,
    #[error("Invalid timeout: {0} (must be between 1 and 300 seconds)")]
    InvalidTimeout(u64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Config {
    #[inline]
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join("config.toml");

        if !config_path.exists() {
            return Ok(Self {
                openai: OpenAiConfig::default(),
                pinecone: PineconeConfig::default(),
                base_dir: config_dir.as_ref().to_path_buf(),
            });
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
        config.base_dir = config_dir.as_ref().to_path_buf();

        config
            .validate()
            .with_context(|| "Configuration validation failed")?;

        Ok(config)
    }

    #[inline]
    pub fn save(&self) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                self.base_dir.display()
            )
        })?;

        let config_path = self.config_file_path();
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    #[inline]
    pub fn config_file_path(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.openai.validate()?;
        self.pinecone.validate()?;
        Ok(())
    }
}

impl OpenAiConfig {
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.model.clone()));
        }
        Url::parse(&self.base_url).map_err(|_| ConfigError::InvalidUrl(self.base_url.clone()))?;
        validate_timeout(self.timeout_seconds)?;
        Ok(())
    }

    /// API key from the config file, or the environment when the file has none.
    #[inline]
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(&self.api_key, OPENAI_API_KEY_VAR)
    }
}

impl PineconeConfig {
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.index_host.is_empty() {
            Url::parse(&self.index_host)
                .map_err(|_| ConfigError::InvalidUrl(self.index_host.clone()))?;
        }
        validate_timeout(self.timeout_seconds)?;
        Ok(())
    }

    /// API key from the config file, or the environment when the file has none.
    #[inline]
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(&self.api_key, PINECONE_API_KEY_VAR)
    }
}

fn validate_timeout(seconds: u64) -> Result<(), ConfigError> {
    if seconds == 0 || seconds > 300 {
        return Err(ConfigError::InvalidTimeout(seconds));
    }
    Ok(())
}

fn resolve_api_key(configured: &str, var: &str) -> Option<String> {
    if !configured.is_empty() {
        return Some(configured.to_string());
    }
    env::var(var).ok().filter(|v| !v.is_empty())
}

/// Platform configuration directory for this application.
#[inline]
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("arxiv-search"))
        .ok_or(ConfigError::DirectoryError)
}
