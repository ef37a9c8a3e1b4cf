//! Configuration file parser for ~/.config/feedwatch/config.json.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning when the file
//! contains potential typos.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Refresh intervals offered by the Configure screen, in cycle order.
pub const REFRESH_INTERVALS: [Duration; 3] = [
    Duration::from_secs(60),
    Duration::from_secs(5 * 60),
    Duration::from_secs(15 * 60),
];

const MIN_REFRESH_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("HOME environment variable not set")]
    NoHome,
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between automatic refreshes.
    pub refresh_interval_secs: u64,

    /// Source list document, relative to the config directory unless absolute.
    pub feeds_file: PathBuf,

    /// Seen-set document, relative to the config directory unless absolute.
    pub seen_articles_file: PathBuf,

    /// Theme name: "default", "dark" or "ocean".
    pub color_theme: String,

    /// Desktop notifications for new articles.
    pub enable_notifications: bool,

    /// Where this config was loaded from (and is saved back to).
    #[serde(skip)]
    pub config_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5 * 60,
            feeds_file: PathBuf::from("feeds.json"),
            seen_articles_file: PathBuf::from("seen.json"),
            color_theme: "default".to_string(),
            enable_notifications: true,
            config_file: PathBuf::from("config.json"),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "refresh_interval_secs",
        "feeds_file",
        "seen_articles_file",
        "color_theme",
        "enable_notifications",
    ];

    /// Load configuration from a JSON file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid JSON → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    ///
    /// The returned config remembers `path` as its `config_file`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let defaults = || Self {
            config_file: path.to_path_buf(),
            ..Self::default()
        };

        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(defaults());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(defaults());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(defaults());
        }

        let raw: serde_json::Value = serde_json::from_str(&content)?;
        if let Some(object) = raw.as_object() {
            for key in object.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let mut config: Config = serde_json::from_value(raw)?;
        config.config_file = path.to_path_buf();
        tracing::info!(
            path = %path.display(),
            theme = %config.color_theme,
            refresh_secs = config.refresh_interval_secs,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// `~/.config/feedwatch/`
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
        Ok(PathBuf::from(home).join(".config").join("feedwatch"))
    }

    /// Effective refresh interval; values below one minute are raised to it.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(MIN_REFRESH_SECS))
    }

    /// Advance to the next offered interval: 1m → 5m → 15m → 1m.
    ///
    /// Any value not in the cycle (hand-edited config) restarts at 1m.
    pub fn cycle_refresh_interval(&mut self) {
        let current = Duration::from_secs(self.refresh_interval_secs);
        let next = REFRESH_INTERVALS
            .iter()
            .position(|d| *d == current)
            .map(|i| REFRESH_INTERVALS[(i + 1) % REFRESH_INTERVALS.len()])
            .unwrap_or(REFRESH_INTERVALS[0]);
        self.refresh_interval_secs = next.as_secs();
    }
}
