use crate::cluster::{MaskPolicy, MergeConfig};
use crate::loader::LoadOptions;
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_min_overlap")]
    pub min_overlap: usize,
    #[serde(default)]
    pub tolerate_gaps: bool,
    #[serde(default)]
    pub tolerate_ambiguous: bool,
    #[serde(default = "default_min_reads")]
    pub min_reads: u32,
    #[serde(default)]
    pub min_mapping_quality: u8,
    #[serde(default)]
    pub min_base_quality: u8,
    #[serde(default)]
    pub mask_policy: MaskPolicy,
}

fn default_min_overlap() -> usize {
    20
}

fn default_min_reads() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_overlap: default_min_overlap(),
            tolerate_gaps: false,
            tolerate_ambiguous: false,
            min_reads: default_min_reads(),
            min_mapping_quality: 0,
            min_base_quality: 0,
            mask_policy: MaskPolicy::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "bamclust", "bamclust")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
    }

    /// Loads `path` if given, failing on any error. Without a path the per-user
    /// config is used when present and readable, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                match Self::from_file(&config_path) {
                    Ok(config) => return Ok(config),
                    Err(e) => warn!("Ignoring user config: {}", e),
                }
            }
        }
        Ok(Config::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn merge_config(&self) -> MergeConfig {
        MergeConfig::new(self.min_overlap, self.tolerate_gaps, self.tolerate_ambiguous)
            .with_mask_policy(self.mask_policy)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            min_mapping_quality: self.min_mapping_quality,
            min_base_quality: self.min_base_quality,
        }
    }
}
