//! Gatelog configuration
//!
//! Layering: defaults, then an optional JSON file, then environment
//! variables. CLI flags are applied last by the binary.

use crate::error::{BusinessError, BusinessResult};
use gatelog_core::AccessPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "GATELOG_DATA_DIR";
pub const ENV_EXPORT_DIR: &str = "GATELOG_EXPORT_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatelogConfig {
    /// Directory holding `users.json` and `logs.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory export files are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default)]
    pub policy: AccessPolicy,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GatelogConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            export_dir: default_export_dir(),
            policy: AccessPolicy::default(),
        }
    }
}

impl GatelogConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: &Path) -> BusinessResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| BusinessError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| BusinessError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults or file, then process environment; validated
    pub fn load(path: Option<&Path>) -> BusinessResult<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        let config = config.with_env(|key| std::env::var(key).ok());
        config.policy.validate()?;
        Ok(config)
    }

    /// Override from environment-style lookups (empty values ignored)
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_EXPORT_DIR).filter(|v| !v.trim().is_empty()) {
            self.export_dir = PathBuf::from(dir);
        }
        self
    }
}
