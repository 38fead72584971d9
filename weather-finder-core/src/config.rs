use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{autocomplete::AutocompleteSettings, navigation::MenuItem};

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the weather-finder backend, e.g. "http://localhost:8000".
    pub base_url: Option<String>,

    /// Language code sent with weather lookups, e.g. "de".
    pub language: Option<String>,

    /// Example TOML:
    /// [autocomplete]
    /// min_length = 3
    /// delay_ms = 500
    pub autocomplete: AutocompleteSettings,

    /// Main navigation entries; the mobile menu is cloned from these.
    pub menu: Vec<MenuItem>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            language: None,
            autocomplete: AutocompleteSettings::default(),
            menu: vec![MenuItem::new("Home", "/")],
        }
    }
}

impl Config {
    /// Backend base URL, with a hint when it was never configured.
    pub fn base_url(&self) -> Result<&str> {
        self.base_url.as_deref().filter(|url| !url.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No backend URL configured.\n\
                 Hint: run `weather-finder configure` or pass `--base-url <url>`."
            )
        })
    }

    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = Some(url.into());
    }

    /// Blank languages clear the setting.
    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language.map(|l| l.trim().to_string()).filter(|l| !l.is_empty());
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load from an explicit file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-finder", "weather-finder")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
