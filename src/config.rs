use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    /// Per-request timeout. Absent means requests may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Config file if there is one, otherwise `OPENCLASS_URL` /
    /// `OPENCLASS_TIMEOUT_SECS`, otherwise the local default backend.
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config at {}", path.display()))?;
                return Self::from_toml(&contents);
            }
        }

        Self::from_env(|key| std::env::var(key).ok())
    }

    fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).with_context(|| "Failed to parse config.toml")
    }

    fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("OPENCLASS_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let request_timeout_secs = lookup("OPENCLASS_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("OPENCLASS_TIMEOUT_SECS is not a number: {raw}"))
            })
            .transpose()?;

        Ok(Self {
            base_url,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn generate_default() -> Result<PathBuf> {
        let path = Self::config_path()
            .with_context(|| "Could not determine config directory")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(&Config::default())?;
        std::fs::write(&path, toml_str)?;
        Ok(path)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("openclass").join("config.toml"))
    }
}
