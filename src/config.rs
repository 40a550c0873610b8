//! User configuration
//!
//! Optional TOML file at `$FINVIEW_CONFIG` or `<config_home>/finview/config.toml`.
//! A missing file means defaults; a malformed one is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::export::DEFAULT_COLUMN_WIDTH;

pub const CONFIG_ENV: &str = "FINVIEW_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Length of the default date window ending today
    pub default_range_days: u64,
    /// Width of every exported spreadsheet column
    pub column_width: f64,
    /// Where exported workbooks are written (current directory when unset)
    pub output_dir: Option<PathBuf>,
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_range_days: 365,
            column_width: DEFAULT_COLUMN_WIDTH,
            output_dir: None,
            user_agent: "Mozilla/5.0 (compatible; FinviewBot/1.0)".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Resolved location of the config file, if one can be determined
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dir_spec::config_home().map(|dir| dir.join("finview").join("config.toml"))
}

/// Load the config from the default location
pub fn load_config() -> Result<AppConfig> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(AppConfig::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: AppConfig = toml::from_str(&text)
        .with_context(|| format!("Invalid config file {:?}", path))?;

    debug!("Loaded config from {:?}", path);
    Ok(config)
}
