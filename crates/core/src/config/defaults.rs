//! Default values and functions for configuration

use super::TelegramConfig;

/// Poll interval applied when none is configured or the configured value is zero
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 5;

pub(crate) const DEFAULT_API_URL: &str = "https://api.telegram.org/bot";

pub(crate) fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

pub(crate) fn default_interval_secs() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}

pub(crate) fn default_telegram_config() -> TelegramConfig {
    TelegramConfig {
        api_url: default_api_url(),
        bot_token: String::new(),
        chat_id: String::new(),
    }
}
