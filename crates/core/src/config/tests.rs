//! Tests for configuration module

use super::*;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

#[test]
fn test_from_file_full() {
    let file = create_temp_config_file(
        r#"
        [telegram]
        api_url = "http://localhost:8081/bot"
        bot_token = "123:abc"
        chat_id = "@testchannel"

        [sync]
        watch_dirs = ["/data/inbox", "/data/outbox"]
        interval_secs = 2
        allow_patterns = ["\\.pdf$"]
        deny_patterns = ["\\.tmp$", "~$"]
    "#,
    );

    let config = Config::from_file(file.path()).expect("Failed to parse valid TOML");
    assert_eq!(config.telegram.api_url, "http://localhost:8081/bot");
    assert_eq!(config.telegram.bot_token, "123:abc");
    assert_eq!(config.telegram.chat_id, "@testchannel");
    assert_eq!(
        config.sync.watch_dirs,
        vec![
            std::path::PathBuf::from("/data/inbox"),
            std::path::PathBuf::from("/data/outbox")
        ]
    );
    assert_eq!(config.sync.interval_secs, 2);
    assert_eq!(config.sync.allow_patterns, vec![r"\.pdf$".to_string()]);
    assert_eq!(
        config.sync.deny_patterns,
        vec![r"\.tmp$".to_string(), "~$".to_string()]
    );
}

#[test]
fn test_from_toml_str_minimal() {
    let config = Config::from_toml_str(
        r#"
        [telegram]
        bot_token = "123:abc"
        chat_id = "@testchannel"
    "#,
    )
    .expect("minimal TOML should parse");

    assert_eq!(config.telegram.api_url, "https://api.telegram.org/bot");
    assert_eq!(config.sync.interval_secs, DEFAULT_SYNC_INTERVAL_SECS);
    assert!(config.sync.watch_dirs.is_empty());
}

#[test]
fn test_from_toml_str_invalid() {
    assert!(Config::from_toml_str("sync = 3").is_err());
}

#[test]
fn test_from_file_missing_uses_defaults() {
    let config =
        Config::from_file(Path::new("/nonexistent/telesync.toml")).expect("defaults should load");
    assert_eq!(config.telegram.api_url, "https://api.telegram.org/bot");
    assert!(config.sync.watch_dirs.is_empty());
    assert_eq!(config.sync.interval_secs, DEFAULT_SYNC_INTERVAL_SECS);
    assert!(config.sync.allow_patterns.is_empty());
    assert!(config.sync.deny_patterns.is_empty());
}

#[test]
fn test_validate_requires_token_and_chat() {
    let mut config = Config::default();
    assert!(config.validate().is_err());

    config.telegram.bot_token = "123:abc".to_string();
    assert!(config.validate().is_err());

    config.telegram.chat_id = "@testchannel".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_interval_zero_falls_back_to_default() {
    let config = SyncConfig {
        interval_secs: 0,
        ..Default::default()
    };
    assert_eq!(
        config.interval(),
        std::time::Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS)
    );

    let config = SyncConfig {
        interval_secs: 30,
        ..Default::default()
    };
    assert_eq!(config.interval(), std::time::Duration::from_secs(30));
}

#[test]
fn test_split_csv() {
    assert_eq!(split_csv("a,b,c"), vec!["a", "b", "c"]);
    assert_eq!(split_csv(" /tmp/a , /tmp/b "), vec!["/tmp/a", "/tmp/b"]);
    assert_eq!(split_csv(",,"), Vec::<String>::new());
    assert_eq!(split_csv(""), Vec::<String>::new());
}

#[test]
fn test_debug_redacts_token() {
    let config = TelegramConfig {
        api_url: "https://api.telegram.org/bot".to_string(),
        bot_token: "123:secret".to_string(),
        chat_id: "@c".to_string(),
    };
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("secret"));
}
