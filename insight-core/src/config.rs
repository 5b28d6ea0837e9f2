use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::error::FetchError;

/// Environment variable consulted first when resolving the API key.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key, set via `insight configure`.
    pub api_key: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-insight", "insight")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Where a provider obtains its API credential.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// Use this exact key. Tests and embedding applications inject one.
    Fixed(String),
    /// Look the key up on every call: [`API_KEY_ENV`] first, then the
    /// config file. Never cached between calls.
    Resolved,
}

impl KeySource {
    /// Resolve the credential, failing with
    /// [`FetchError::MissingApiKey`] before any network activity.
    pub fn api_key(&self) -> Result<String, FetchError> {
        match self {
            KeySource::Fixed(key) if !key.trim().is_empty() => Ok(key.clone()),
            KeySource::Fixed(_) => Err(FetchError::MissingApiKey),
            KeySource::Resolved => resolve_api_key(),
        }
    }
}

/// Call-time credential lookup: environment first, config file second.
pub fn resolve_api_key() -> Result<String, FetchError> {
    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }

    Config::load()
        .ok()
        .and_then(|cfg| cfg.api_key)
        .filter(|key| !key.trim().is_empty())
        .ok_or(FetchError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_key() {
        let cfg = Config::default();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
        };

        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");

        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn fixed_key_is_returned_verbatim() {
        let source = KeySource::Fixed("KEY".to_string());
        assert_eq!(source.api_key().expect("key present"), "KEY");
    }

    #[test]
    fn blank_fixed_key_is_missing() {
        let source = KeySource::Fixed("  ".to_string());
        assert_eq!(source.api_key().unwrap_err(), FetchError::MissingApiKey);
    }
}
