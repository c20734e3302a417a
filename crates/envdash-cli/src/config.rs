//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use envdash_core::{DEFAULT_TIMEOUT, Tab};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default device URL
    #[serde(default)]
    pub url: Option<String>,

    /// Default output format
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Terminal dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Tab shown at startup when the URL has no fragment
    #[serde(default)]
    pub default_tab: Option<Tab>,

    /// Theme preference: "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_tab: None,
            theme: default_theme(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("envdash")
            .join("config.toml")
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load config from `path`, or return default if missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the device URL from arg (or env var, via clap), then config.
pub fn resolve_url(url: Option<String>, config: &Config) -> Option<String> {
    url.or_else(|| config.url.clone())
}

/// Resolve timeout: flag, then config, then the client default.
pub fn resolve_timeout(flag: Option<u64>, config: &Config) -> Duration {
    flag.or(config.timeout)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}

/// Resolve the dashboard's start tab.
///
/// An explicit `--tab` wins, then a fragment on the URL, then the config
/// file. Unknown names fall through to the next source; the last resort is
/// the environment tab.
pub fn resolve_tab(flag: Option<&str>, fragment: Option<&str>, config: &Config) -> Tab {
    flag.and_then(|t| t.parse().ok())
        .or_else(|| fragment.and_then(|f| f.parse().ok()))
        .or(config.dashboard.default_tab)
        .unwrap_or_default()
}
