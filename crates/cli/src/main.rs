//! telesync - relay watched directories to a Telegram chat
//!
//! This binary wires configuration, the Bot API client, and the sync engine
//! together into a daemon with graceful shutdown.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use telesync_core::config::Config;
use telesync_sync::{SyncService, SyncTarget};
use telesync_telegram::{BotClient, Uploader};
use telesync_watcher::FilterPolicy;
use tracing::{error, info, warn};

const DEFAULT_CONFIG_FILE: &str = "telesync.toml";

#[derive(Parser)]
#[command(name = "telesync")]
#[command(about = "Relay new and changed files from watched directories to a Telegram chat")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the configured directories until interrupted (default)
    Run,
    /// Perform a single pass over PATH, or over every configured directory
    Once {
        /// Directory to sync instead of the configured watch list
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::from_file(&config_path)?;
    config.validate()?;

    match cli.command {
        Some(Commands::Once { path }) => once(&config, path.as_deref()).await,
        Some(Commands::Run) | None => run(&config).await,
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "telesync={level},telesync_core={level},telesync_watcher={level},\
             telesync_telegram={level},telesync_sync={level}"
        ))
        .init();
}

fn build_service(config: &Config) -> Result<(Arc<BotClient>, SyncService)> {
    let bot = Arc::new(BotClient::new(
        &config.telegram.api_url,
        &config.telegram.bot_token,
    )?);
    let filter = FilterPolicy::new(&config.sync.allow_patterns, &config.sync.deny_patterns)?;
    let target = SyncTarget::new(config.telegram.chat_id.clone(), bot.clone());
    Ok((bot, SyncService::new(target, filter)))
}

/// Watch every configured directory until Ctrl+C
async fn run(config: &Config) -> Result<()> {
    let (bot, service) = build_service(config)?;
    let chat_id = &config.telegram.chat_id;

    // Startup notification; delivery failure is logged, not fatal
    match bot
        .send_message(chat_id, "telesync started, watching for file changes")
        .await
    {
        Ok(receipt) => info!("startup message delivered (message {})", receipt.message_id),
        Err(e) => warn!("failed to send startup message: {e}"),
    }

    if config.sync.watch_dirs.is_empty() {
        warn!("no watch directories configured; set sync.watch_dirs or TELEGRAM_WATCH_DIRS");
    }

    let interval = config.sync.interval();
    for dir in &config.sync.watch_dirs {
        match service.start_continuous_sync(dir, interval).await {
            Ok(()) => info!("watching {} (interval {:?})", dir.display(), interval),
            Err(e) => error!("cannot watch {}: {e}", dir.display()),
        }
    }

    info!("telesync running; press Ctrl+C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("shutting down");
    service.stop().await;

    if let Err(e) = bot.send_message(chat_id, "telesync shutting down").await {
        warn!("failed to send shutdown message: {e}");
    }
    Ok(())
}

/// Single synchronous pass, no pollers
async fn once(config: &Config, path: Option<&Path>) -> Result<()> {
    let (_bot, service) = build_service(config)?;

    match path {
        Some(path) => {
            service
                .sync_once(path)
                .await
                .with_context(|| format!("sync of {} failed", path.display()))?;
        }
        None => {
            if config.sync.watch_dirs.is_empty() {
                bail!("no directories configured; pass PATH or set sync.watch_dirs");
            }
            for dir in &config.sync.watch_dirs {
                if let Err(e) = service.sync_once(dir).await {
                    error!("sync of {} failed: {e}", dir.display());
                }
            }
        }
    }
    Ok(())
}
