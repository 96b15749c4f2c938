//! Configuration loading for whitelist override sources.
//!
//! Precedence (highest to lowest):
//!
//! 1. Environment variables
//! 2. `.sql-sentry.toml` in the current directory
//! 3. Default values (bundled whitelists only, no external overrides)
//!
//! # Configuration File Format
//!
//! ```toml
//! [whitelist]
//! table_file = "config/table_whitelist.conf"
//! function_file = "config/function_whitelist.conf"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_SENTRY_TABLE_WHITELIST` | Path to an external table whitelist |
//! | `SQL_SENTRY_FUNCTION_WHITELIST` | Path to an external function whitelist |

use std::{env, fs, path::PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub whitelist: WhitelistConfig
}

/// External whitelist override sources; `None` means use the bundled default.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WhitelistConfig {
    pub table_file:    Option<PathBuf>,
    pub function_file: Option<PathBuf>
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        let local_config = PathBuf::from(".sql-sentry.toml");
        if local_config.exists() {
            let content = fs::read_to_string(&local_config)
                .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
            config = toml::from_str(&content)
                .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
        }

        if let Ok(path) = env::var("SQL_SENTRY_TABLE_WHITELIST") {
            config.whitelist.table_file = Some(PathBuf::from(path));
        }

        if let Ok(path) = env::var("SQL_SENTRY_FUNCTION_WHITELIST") {
            config.whitelist.function_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}
