//! Wiring: configuration to a live session

use anyhow::{Context, Result};
use gatelog_business::{GatelogConfig, SessionController};
use gatelog_core::SystemClock;
use gatelog_persistence::JsonFileStore;
use std::path::{Path, PathBuf};

use crate::commands::Session;

/// Config file, then environment, then `--data-dir`
pub fn load_config(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<GatelogConfig> {
    let mut config = GatelogConfig::load(config_path).context("Failed to load configuration")?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        export_dir = %config.export_dir.display(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Open the JSON store under the configured data directory
pub fn open_session(config: &GatelogConfig) -> Result<Session> {
    let store = JsonFileStore::open(&config.data_dir).with_context(|| {
        format!("Failed to open data directory {}", config.data_dir.display())
    })?;
    let session = SessionController::open(store, SystemClock, config.policy.clone())
        .context("Failed to load stored state")?;
    Ok(session)
}
