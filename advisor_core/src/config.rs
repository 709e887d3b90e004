//! User configuration for the advisor tools.
//!
//! Loaded from the first of:
//! 1. an explicit path (`--config`)
//! 2. `./fps-advisor.json`
//! 3. `~/.fps-advisor/config.json`
//!
//! A missing file means defaults. Every section and key is optional; unknown
//! keys are ignored.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::logging::{parse_level, LogConfig};
use crate::types::{QualityPreset, ResolutionSpec};

pub const LOCAL_CONFIG_FILE: &str = "fps-advisor.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub target_fps: u32,
    pub resolution: ResolutionSpec,
    pub quality: QualityPreset,
    pub prefer_quality: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            target_fps: 60,
            resolution: ResolutionSpec::FHD,
            quality: QualityPreset::High,
            prefer_quality: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// External calibration tables replacing the built-in ones.
    pub tables_path: Option<PathBuf>,
    /// Custom game database merged over the built-in catalog.
    pub games_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub log_dir: Option<PathBuf>,
    pub level: String,
    pub max_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_dir: None,
            level: "info".to_string(),
            max_files: 5,
        }
    }
}

impl LoggingSettings {
    /// Unknown level names fall back to the default level.
    pub fn to_log_config(&self) -> LogConfig {
        let mut config = LogConfig::new().with_max_files(self.max_files);
        if let Some(dir) = &self.log_dir {
            config = config.with_log_dir(dir);
        }
        if let Some(level) = parse_level(&self.level) {
            config = config.with_level(level);
        }
        config
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub preferences: Preferences,
    pub data: DataPaths,
    pub logging: LoggingSettings,
}

impl AdvisorConfig {
    /// Load from `explicit` if given (must exist), else the first discovered file.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_source(explicit).map(|(config, _)| config)
    }

    /// Like [`Self::load`], also returning the file the settings came from
    /// (`None` means defaults). Nothing is logged here: the caller reads the
    /// logging section first and reports the source once logging is up.
    pub fn load_with_source(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::discover() {
                Some(path) => path,
                None => return Ok((Self::default(), None)),
            },
        };
        let config = Self::load_from(&path)?;
        Ok((config, Some(path)))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            action: "write",
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// First existing candidate from [`Self::candidate_paths`].
    pub fn discover() -> Option<PathBuf> {
        Self::candidate_paths().into_iter().find(|p| p.is_file())
    }

    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(home) = user_config_path() {
            paths.push(home);
        }
        paths
    }
}

/// `~/.fps-advisor/config.json`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fps-advisor").join("config.json"))
}
