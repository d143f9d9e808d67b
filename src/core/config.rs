use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://interview.switcheo.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SwitcheoProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub switcheo: Option<SwitcheoProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            switcheo: Some(SwitcheoProviderConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Source currency to use when `--from` is not passed. Falls back to the
    /// first catalog entry.
    pub default_from: Option<String>,
    /// Target currency to use when `--to` is not passed. Falls back to the
    /// second catalog entry.
    pub default_to: Option<String>,
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults when
    /// no config file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using built-in defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "swapx", "swapx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Base URL for the price catalog endpoint.
    pub fn catalog_base_url(&self) -> &str {
        self.providers
            .switcheo
            .as_ref()
            .map_or(DEFAULT_BASE_URL, |p| &p.base_url)
    }
}
