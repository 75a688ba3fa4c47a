//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;
use tracing::warn;

use super::defaults::*;
use super::{split_csv, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `TELESYNC_` and use double
    /// underscores for nested values, e.g. `TELESYNC_SYNC__INTERVAL_SECS=10`.
    /// The legacy variables of the original tool (`TELEGRAM_BOT_TOKEN`,
    /// `TELEGRAM_CHAT_ID`, `TELEGRAM_WATCH_DIRS`, `WHITELIST_REGEXP`,
    /// `BLACKLIST_REGEXP`) are applied last and win over both.
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // Set defaults explicitly (the config crate does not apply serde
        // defaults for missing sections)
        let builder = set_config_default(builder, "telegram.api_url", default_api_url())?;
        let builder = set_config_default(builder, "telegram.bot_token", "")?;
        let builder = set_config_default(builder, "telegram.chat_id", "")?;
        let builder = set_config_default(builder, "sync.watch_dirs", Vec::<String>::new())?;
        let builder =
            set_config_default(builder, "sync.interval_secs", default_interval_secs() as i64)?;
        let builder = set_config_default(builder, "sync.allow_patterns", Vec::<String>::new())?;
        let mut builder = set_config_default(builder, "sync.deny_patterns", Vec::<String>::new())?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with TELESYNC_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TELESYNC")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy environment variables from the original tool
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            builder = builder
                .set_override("telegram.bot_token", token)
                .map_err(|e| Error::config(format!("Failed to set TELEGRAM_BOT_TOKEN: {e}")))?;
        }
        if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") {
            builder = builder
                .set_override("telegram.chat_id", chat_id)
                .map_err(|e| Error::config(format!("Failed to set TELEGRAM_CHAT_ID: {e}")))?;
        }
        if let Ok(api_url) = std::env::var("TELEGRAM_API_URL") {
            builder = builder
                .set_override("telegram.api_url", api_url)
                .map_err(|e| Error::config(format!("Failed to set TELEGRAM_API_URL: {e}")))?;
        }
        if let Ok(dirs) = std::env::var("TELEGRAM_WATCH_DIRS") {
            builder = builder
                .set_override("sync.watch_dirs", split_csv(&dirs))
                .map_err(|e| Error::config(format!("Failed to set TELEGRAM_WATCH_DIRS: {e}")))?;
        }
        if let Ok(allow) = std::env::var("WHITELIST_REGEXP") {
            builder = builder
                .set_override("sync.allow_patterns", split_csv(&allow))
                .map_err(|e| Error::config(format!("Failed to set WHITELIST_REGEXP: {e}")))?;
        }
        if let Ok(deny) = std::env::var("BLACKLIST_REGEXP") {
            builder = builder
                .set_override("sync.deny_patterns", split_csv(&deny))
                .map_err(|e| Error::config(format!("Failed to set BLACKLIST_REGEXP: {e}")))?;
        }
        if let Ok(secs) = std::env::var("SYNC_INTERVAL_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => {
                    builder = builder.set_override("sync.interval_secs", secs as i64).map_err(
                        |e| Error::config(format!("Failed to set SYNC_INTERVAL_SECS: {e}")),
                    )?;
                }
                Err(e) => warn!("ignoring SYNC_INTERVAL_SECS value '{secs}': {e}"),
            }
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build configuration: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize configuration: {e}")))
    }
}
