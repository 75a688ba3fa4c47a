//! Capability trait for delivering content to a destination chat

use crate::models::Message;
use async_trait::async_trait;
use std::path::Path;
use telesync_core::error::Result;

/// Outbound delivery capability consumed by the sync engine
///
/// One method per attachment category plus plain text. Every call returns
/// the delivered [`Message`] as the receipt. Implementations are expected to
/// fail with a descriptive error on empty paths, unreadable files, and files
/// over the transport's size ceiling.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Send a plain text message
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<Message>;

    /// Send a file as a general document attachment
    async fn send_document(&self, chat_id: &str, path: &Path, caption: &str) -> Result<Message>;

    /// Send a file as an audio attachment
    async fn send_audio(&self, chat_id: &str, path: &Path, caption: &str) -> Result<Message>;

    /// Send a file as a photo attachment
    async fn send_photo(&self, chat_id: &str, path: &Path, caption: &str) -> Result<Message>;

    /// Send a file as a video attachment
    async fn send_video(&self, chat_id: &str, path: &Path, caption: &str) -> Result<Message>;
}
