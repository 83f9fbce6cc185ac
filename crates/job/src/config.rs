//! Job configuration
//!
//! Everything the builder would otherwise hard-code lives here: the working
//! directory name, the downloader executable, the audio format id and the
//! playlist marker. Values are read from an optional JSON file; missing
//! fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the folder created under the chosen drive
pub const DEFAULT_WORKING_DIR_NAME: &str = "youtube-dl-temp";
/// Downloader executable looked up on PATH
pub const DEFAULT_EXECUTABLE: &str = "youtube-dl";
/// m4a audio-only stream on YouTube
pub const DEFAULT_AUDIO_FORMAT_ID: &str = "140";
pub const DEFAULT_COLLECTION_MARKER: &str = "&list=";
pub const DEFAULT_SINGLE_TEMPLATE: &str = "%(title)s.%(ext)s";
pub const DEFAULT_COLLECTION_TEMPLATE: &str = "%(playlist_index)s-%(title)s.%(ext)s";
pub const DEFAULT_DRIVE: &str = "D:";

const CONFIG_DIR_NAME: &str = "quicker-ytdl";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings consumed by the job builder. Immutable once a
/// [`Downloader`](crate::Downloader) has been constructed with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub working_dir_name: String,
    pub executable: String,
    pub audio_format_id: String,
    /// Substring that marks a URL as a playlist
    pub collection_marker: String,
    pub single_template: String,
    pub collection_template: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            working_dir_name: DEFAULT_WORKING_DIR_NAME.to_string(),
            executable: DEFAULT_EXECUTABLE.to_string(),
            audio_format_id: DEFAULT_AUDIO_FORMAT_ID.to_string(),
            collection_marker: DEFAULT_COLLECTION_MARKER.to_string(),
            single_template: DEFAULT_SINGLE_TEMPLATE.to_string(),
            collection_template: DEFAULT_COLLECTION_TEMPLATE.to_string(),
        }
    }
}

impl JobConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("working_dir_name", &self.working_dir_name),
            ("executable", &self.executable),
            ("audio_format_id", &self.audio_format_id),
            ("collection_marker", &self.collection_marker),
            ("single_template", &self.single_template),
            ("collection_template", &self.collection_template),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }

        // Only one directory level is ever created
        if self.working_dir_name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "working_dir_name must be a single folder name, got {:?}",
                self.working_dir_name
            )));
        }

        Ok(())
    }
}

/// Top-level config file: job settings plus front-end defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Drive used when none is given on the command line
    pub default_drive: String,
    /// Whether downloads are audio-only unless overridden
    pub audio_only: bool,
    pub job: JobConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_drive: DEFAULT_DRIVE.to_string(),
            audio_only: false,
            job: JobConfig::default(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/quicker-ytdl/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the default location. A missing
    /// default file yields the built-in defaults; a missing explicit file
    /// is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_drive.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_drive must not be empty".to_string(),
            ));
        }
        self.job.validate()
    }
}
