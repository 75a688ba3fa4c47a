//! Configuration module for the telesync daemon
//!
//! Configuration can be loaded from TOML files and/or environment variables.
//! The legacy environment variables of the original tool
//! (`TELEGRAM_BOT_TOKEN`, `TELEGRAM_WATCH_DIRS`, ...) are still honored as
//! overrides on top of the file-based configuration.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use defaults::DEFAULT_SYNC_INTERVAL_SECS;

use defaults::*;

/// Telegram Bot API connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Base URL of the Bot API, token appended directly (no trailing slash)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bot token used for authentication
    #[serde(default)]
    pub bot_token: String,

    /// Destination chat or channel identifier (numeric id or `@channelname`)
    #[serde(default)]
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Directory watching and relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Directories placed under continuous watch at startup
    #[serde(default)]
    pub watch_dirs: Vec<PathBuf>,

    /// Poll interval in seconds; zero falls back to the default
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Allow patterns (regex); empty list admits every path
    #[serde(default)]
    pub allow_patterns: Vec<String>,

    /// Deny patterns (regex); any match makes a path ineligible
    #[serde(default)]
    pub deny_patterns: Vec<String>,
}

impl SyncConfig {
    /// Poll interval as a [`Duration`], substituting the default for zero
    pub fn interval(&self) -> Duration {
        let secs = if self.interval_secs == 0 {
            DEFAULT_SYNC_INTERVAL_SECS
        } else {
            self.interval_secs
        };
        Duration::from_secs(secs)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            watch_dirs: Vec::new(),
            interval_secs: default_interval_secs(),
            allow_patterns: Vec::new(),
            deny_patterns: Vec::new(),
        }
    }
}

/// Main configuration structure for the telesync daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Telegram Bot API settings
    #[serde(default = "default_telegram_config")]
    pub telegram: TelegramConfig,

    /// Watching and relay settings
    #[serde(default)]
    pub sync: SyncConfig,
}

impl Config {
    /// Parses configuration from a TOML string, applying serde defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Validates that the configuration is usable for talking to the Bot API
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.is_empty() {
            return Err(Error::config(
                "telegram.bot_token is required (or set TELEGRAM_BOT_TOKEN)",
            ));
        }
        if self.telegram.chat_id.is_empty() {
            return Err(Error::config(
                "telegram.chat_id is required (or set TELEGRAM_CHAT_ID)",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: default_telegram_config(),
            sync: SyncConfig::default(),
        }
    }
}

/// Splits a comma-separated environment value into trimmed, non-empty items
pub(crate) fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
