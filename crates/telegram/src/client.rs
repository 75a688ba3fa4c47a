//! HTTP-backed Bot API client

use crate::models::{ApiResponse, FileInfo, Message, SendMessageRequest};
use crate::uploader::Uploader;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use telesync_core::error::{Error, Result};
use tracing::debug;

/// Upload ceiling enforced by the Bot API for files sent by bots
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Request timeout; uploads of files near the size ceiling need headroom
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Bot API client delivering messages and typed file attachments
///
/// The base URL is the API root with the bot token appended
/// (`https://api.telegram.org/bot<token>`); each method name is a path
/// segment below it.
pub struct BotClient {
    http: Client,
    base_url: String,
}

impl BotClient {
    /// Create a client for the given API root and bot token
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::telegram(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: format!("{api_url}{token}"),
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Fetch file metadata for a previously delivered attachment
    pub async fn get_file(&self, file_id: &str) -> Result<FileInfo> {
        let response = self
            .http
            .get(self.endpoint("getFile"))
            .query(&[("file_id", file_id)])
            .send()
            .await
            .map_err(|e| Error::telegram(format!("getFile request failed: {e}")))?;

        parse_response("getFile", response).await
    }

    /// Upload a file through the named multipart method
    ///
    /// `field` is the method's file field (`document`, `audio`, `photo`,
    /// `video`). Path, readability, and size are validated before any
    /// network traffic.
    async fn send_file(
        &self,
        method: &'static str,
        field: &'static str,
        chat_id: &str,
        path: &Path,
        caption: &str,
    ) -> Result<Message> {
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_input("file path cannot be empty"));
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::telegram(format!("cannot read {}: {e}", path.display())))?;
        if metadata.len() > MAX_UPLOAD_BYTES {
            return Err(Error::telegram(format!(
                "{} is {} bytes, over the {MAX_UPLOAD_BYTES} byte upload limit",
                path.display(),
                metadata.len()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::telegram(format!("cannot read {}: {e}", path.display())))?;

        debug!("{method}: uploading {} ({} bytes)", path.display(), metadata.len());

        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part(field, Part::bytes(bytes).file_name(file_name));

        let response = self
            .http
            .post(self.endpoint(method))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::telegram(format!("{method} request failed: {e}")))?;

        parse_response(method, response).await
    }
}

/// Unwrap a Bot API response envelope, surfacing API-level failures
async fn parse_response<T: DeserializeOwned>(
    method: &str,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::telegram(format!("{method} failed reading response: {e}")))?;

    let parsed: ApiResponse<T> = serde_json::from_str(&body)
        .map_err(|_| Error::telegram(format!("{method} returned {status}: {body}")))?;

    if !parsed.ok {
        let description = parsed
            .description
            .unwrap_or_else(|| "unknown error".to_string());
        let code = parsed.error_code.unwrap_or_else(|| status.as_u16() as i64);
        return Err(Error::telegram(format!("{method} failed ({code}): {description}")));
    }

    parsed
        .result
        .ok_or_else(|| Error::telegram(format!("{method} returned ok without a result")))
}

#[async_trait]
impl Uploader for BotClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<Message> {
        let request = SendMessageRequest { chat_id, text };

        let response = self
            .http
            .post(self.endpoint("sendMessage"))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::telegram(format!("sendMessage request failed: {e}")))?;

        parse_response("sendMessage", response).await
    }

    async fn send_document(&self, chat_id: &str, path: &Path, caption: &str) -> Result<Message> {
        self.send_file("sendDocument", "document", chat_id, path, caption)
            .await
    }

    async fn send_audio(&self, chat_id: &str, path: &Path, caption: &str) -> Result<Message> {
        self.send_file("sendAudio", "audio", chat_id, path, caption)
            .await
    }

    async fn send_photo(&self, chat_id: &str, path: &Path, caption: &str) -> Result<Message> {
        self.send_file("sendPhoto", "photo", chat_id, path, caption)
            .await
    }

    async fn send_video(&self, chat_id: &str, path: &Path, caption: &str) -> Result<Message> {
        self.send_file("sendVideo", "video", chat_id, path, caption)
            .await
    }
}
