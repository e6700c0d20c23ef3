//! Configuration loading
//!
//! Reads `config.toml` from the platform config directory. A missing file is
//! not an error: every section has workable defaults except the backend URL,
//! which the client validates at construction time.

use std::path::{Path, PathBuf};

use crate::error::DeskhintError;

mod types;

pub use types::{AssistantConfig, BackendConfig, Config, SessionConfig};

/// Path of the user config file, if a config directory exists
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deskhint").join("config.toml"))
}

/// Load the user config, falling back to defaults when no file exists
pub fn load() -> Result<Config, DeskhintError> {
    match config_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(Config::default()),
    }
}

/// Load config from an explicit path
pub fn load_from(path: &Path) -> Result<Config, DeskhintError> {
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| DeskhintError::InvalidConfig(e.to_string()))
}
