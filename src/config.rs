//! Configuration management for capstone-search

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::search::backend::DEFAULT_ENDPOINT;
use crate::search::share::DEFAULT_SITE_URL;
use crate::search::store::DEFAULT_DEBOUNCE;

/// Overrides `search.endpoint`
pub const ENDPOINT_ENV: &str = "CAPSTONE_SEARCH_ENDPOINT";
/// Overrides `site.url`
pub const SITE_URL_ENV: &str = "CAPSTONE_SEARCH_SITE_URL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub debounce_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base for shareable `/?query=` links
    pub url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
                timeout_secs: 30,
            },
            site: SiteConfig {
                url: DEFAULT_SITE_URL.to_string(),
            },
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.search.timeout_secs)
    }

    /// Apply environment overrides
    fn with_env(mut self) -> Self {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            self.search.endpoint = endpoint;
        }
        if let Ok(url) = std::env::var(SITE_URL_ENV) {
            self.site.url = url;
        }
        self
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = directories::ProjectDirs::from("com", "capstone", "search")
        .context("Failed to determine config directory")?
        .config_dir()
        .to_path_buf();

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from file or use defaults
pub fn load_config(custom_path: Option<&str>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        PathBuf::from(p)
    } else {
        config_path()?
    };

    let config = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        parse_config(&content).with_context(|| format!("Failed to parse config from {:?}", path))?
    } else {
        Config::default()
    };

    Ok(config.with_env())
}

fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    if config.search.debounce_ms == 0 {
        anyhow::bail!("search.debounce_ms must be greater than zero");
    }
    if config.search.timeout_secs == 0 {
        anyhow::bail!("search.timeout_secs must be greater than zero");
    }
    Ok(config)
}

/// Initialize configuration file with defaults
pub fn init_config(custom_path: Option<&str>) -> Result<()> {
    let path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => config_path()?,
    };

    if path.exists() {
        println!("Configuration file already exists at {:?}", path);
        return Ok(());
    }

    // Create directory if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }

    let content = toml::to_string_pretty(&Config::default())
        .context("Failed to serialize default config")?;

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config to {:?}", path))?;

    println!("Configuration initialized at {:?}", path);
    Ok(())
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", content);
    Ok(())
}
