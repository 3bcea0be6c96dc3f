use std::fs;
use std::path::{Path, PathBuf};

use chrono::Weekday;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::progress::DEFAULT_RECENT_LIMIT;

const APP_NAME: &str = "liftlog";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_LOG_FILTER: &str = "liftlog=info";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Day the week starts on for weekly goals. Defaults to Sunday.
    pub first_day_of_week: Weekday,
    /// How many workouts the dashboard lists under "recent".
    pub recent_workouts_limit: usize,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Sun,
            recent_workouts_limit: DEFAULT_RECENT_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the user's config directory.
    /// Returns default config if the file doesn't exist or fails to parse.
    pub fn load(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => Self::load_from(path),
            None => get_config_path().and_then(|path| Self::load_from(&path)),
        };

        match result {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the configuration, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)
    }
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let mut path = config_dir().ok_or(ConfigError::NoConfigDir)?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
