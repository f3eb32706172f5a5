//! TOML configuration for endpoint URLs and session options.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

const DEFAULT_SENTIMENT_URL: &str = "http://localhost:5001/analyze_sentiment";
const DEFAULT_CHAT_URL: &str = "http://localhost:5000/chat";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint for sentiment classification.
    pub sentiment_url: String,
    /// Endpoint for reply generation.
    pub chat_url: String,
    /// Where chat history files are written; defaults to the project data dir.
    pub history_dir: Option<PathBuf>,
    /// Clear the current transcript before appending a loaded one.
    pub clear_on_load: bool,
    /// Prefix displayed messages with their timestamp.
    pub show_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentiment_url: DEFAULT_SENTIMENT_URL.to_string(),
            chat_url: DEFAULT_CHAT_URL.to_string(),
            history_dir: None,
            clear_on_load: true,
            show_timestamps: true,
        }
    }
}

/// Errors that can occur when loading configuration from disk.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config at {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Load from the default config path, falling back to defaults when no
    /// file exists yet.
    pub fn load() -> Result<Config, Box<dyn StdError>> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn StdError>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
            let config: Config =
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: config_path.to_path_buf(),
                    source,
                })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<(), Box<dyn StdError>> {
        let parent = config_path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;
        let contents = toml::to_string_pretty(self)?;
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(config_path)?;
        Ok(())
    }

    /// Effective history directory for this configuration.
    pub fn history_dir(&self) -> PathBuf {
        self.history_dir
            .clone()
            .unwrap_or_else(default_history_dir)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "kaiwa", "kaiwa")
}

pub fn default_config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

pub fn default_history_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
