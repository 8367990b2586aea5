//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::web::WebSettings;

/// Database file used when neither `--db` nor the config file name one.
pub const DEFAULT_DATABASE: &str = "notekeep.db";

/// Listen address used when neither `--bind` nor the config file name one.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// SQLite database file
    pub database: Option<PathBuf>,

    /// Address the web server listens on
    pub bind: Option<String>,

    /// Idle session lifetime in hours
    pub session_ttl_hours: Option<i64>,

    /// Send the session cookie only over HTTPS
    pub secure_cookies: Option<bool>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notekeep/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notekeep")
            .join("config.toml")
    }

    /// Resolve the database file, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. Config file `database` setting
    /// 3. `notekeep.db` in the current directory
    pub fn database(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    /// Resolve the listen address, with CLI argument taking precedence.
    pub fn bind(&self, cli_bind: Option<&str>) -> String {
        cli_bind
            .map(str::to_string)
            .or_else(|| self.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    /// Session and cookie settings for the web server.
    pub fn web_settings(&self) -> Result<WebSettings> {
        let hours = self.session_ttl_hours.unwrap_or(DEFAULT_SESSION_TTL_HOURS);
        anyhow::ensure!(
            hours > 0,
            "session_ttl_hours must be positive, got {}",
            hours
        );

        Ok(WebSettings {
            session_ttl: chrono::Duration::hours(hours),
            secure_cookies: self.secure_cookies.unwrap_or(false),
        })
    }
}
