// Configuration management for LocalTube
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::feed::DEFAULT_RECOMMENDATIONS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Where the media server lives; `/api/media` and asset paths hang off this
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// How long one extension counts as "in flight"
    pub extension_cooldown_ms: u64,
    /// Grid rows from the bottom that count as "near the end"
    pub boundary_rows: usize,
    /// Optional ceiling on materialized cards. Unset means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// External program that receives the video URL. Empty disables launching.
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub card_columns: usize,
    /// Shown on every card, the server does not report durations
    pub placeholder_duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            extension_cooldown_ms: 500,
            boundary_rows: 2,
            max_entries: None,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_RECOMMENDATIONS,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: vec!["--really-quiet".to_string()],
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            card_columns: 4,
            placeholder_duration: "3:45".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let directory = dirs::data_local_dir()
            .map(|dir| dir.join("localtube").join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"));
        Self { directory }
    }
}

impl FeedConfig {
    pub fn extension_cooldown(&self) -> Duration {
        Duration::from_millis(self.extension_cooldown_ms)
    }
}

impl PlayerConfig {
    pub fn command(&self) -> Option<&str> {
        Some(self.command.trim()).filter(|cmd| !cmd.is_empty())
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_or_create(&config_path)
    }

    /// Load `path` if it exists, otherwise write defaults there
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("localtube");

        Ok(config_dir.join("config.toml"))
    }
}
