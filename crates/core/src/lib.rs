#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Core types for the telesync file relay daemon
//!
//! This crate provides the foundational pieces shared by every other
//! telesync crate:
//!
//! - **Configuration**: layered loading from TOML files and environment
//!   variables
//! - **Error handling**: unified error and result types
//!

pub mod config;
pub mod error;

// Re-export main types for convenience
pub use config::{Config, SyncConfig, TelegramConfig};
pub use error::{Error, Result, ResultExt};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, ResultExt};
}
