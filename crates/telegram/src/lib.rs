#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Telegram Bot API client for file delivery
//!
//! This crate provides the outbound half of telesync: the [`Uploader`]
//! capability trait consumed by the sync engine, and [`BotClient`], its
//! HTTP-backed implementation over the Bot API
//! (<https://core.telegram.org/bots/api>). Files are delivered as
//! category-typed attachments (`sendDocument`, `sendAudio`, `sendPhoto`,
//! `sendVideo`) via multipart upload, subject to the API's 50 MB ceiling.

mod client;
mod models;
mod uploader;

pub use client::{BotClient, MAX_UPLOAD_BYTES};
pub use models::{
    ApiResponse, Audio, Chat, Document, FileInfo, Message, PhotoSize, ResponseParameters, User,
    Video,
};
pub use uploader::Uploader;
