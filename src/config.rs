/*!
 * File Layer Configuration
 *
 * Runtime options of the legacy file layer and the layout of the
 * reference drive map.
 *
 * Environment variables:
 * - LEGACY_FILES_CONFIG: path of a JSON configuration file
 * - LEGACY_FILES_ALLOW_READONLY: override `allow_read_only` (1/true/0/false)
 */

use crate::core::limits::MIN_HANDLES;
use crate::paths::DriveType;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CONFIG_ENV: &str = "LEGACY_FILES_CONFIG";
pub const ALLOW_READONLY_ENV: &str = "LEGACY_FILES_ALLOW_READONLY";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

/// One drive letter mapped onto a host directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct DriveConfig {
    pub letter: char,
    pub root: PathBuf,
    #[serde(default)]
    pub kind: DriveType,
}

/// File layer configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", default, deny_unknown_fields)]
pub struct Config {
    /// Retry a failed read-write open as read-only (default: false)
    pub allow_read_only: bool,

    /// Initial handle table size of new process contexts (default: 20)
    pub handle_count: usize,

    /// Drive map
    pub drives: Vec<DriveConfig>,

    /// Drive selected at start-up (default: C)
    pub current_drive: char,

    pub windows_directory: String,
    pub system_directory: String,
    pub temp_directory: String,

    /// Directories searched after the program directory, in order
    pub path: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_read_only: false,
            handle_count: MIN_HANDLES,
            drives: Vec::new(),
            current_drive: 'C',
            windows_directory: "C:\\WINDOWS".to_string(),
            system_directory: "C:\\WINDOWS\\SYSTEM".to_string(),
            temp_directory: "C:\\TEMP".to_string(),
            path: Vec::new(),
        }
    }
}

impl Config {
    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load the file named by `LEGACY_FILES_CONFIG` (defaults otherwise) and
    /// apply environment overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                info!(path = %path, "Loading file layer configuration");
                Self::from_file(path)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(value) = std::env::var(ALLOW_READONLY_ENV) {
            config.allow_read_only = parse_flag(&value).ok_or(ConfigError::InvalidEnv {
                var: ALLOW_READONLY_ENV,
                value,
            })?;
        }

        Ok(config)
    }

    pub fn with_allow_read_only(mut self, allow: bool) -> Self {
        self.allow_read_only = allow;
        self
    }

    pub fn with_drive(mut self, letter: char, root: impl Into<PathBuf>) -> Self {
        self.drives.push(DriveConfig {
            letter,
            root: root.into(),
            kind: DriveType::Fixed,
        });
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
