//! # mailscoop-gmail
//!
//! Minimal Gmail REST API (v1) client for the `MailScoop` attachment
//! downloader.
//!
//! The mailbox is consumed through three operations, each a single HTTPS
//! call:
//!
//! - `users.messages.list`: one page of message ids for a search query
//! - `users.messages.get`: full message detail (headers, snippet, parts)
//! - `users.messages.attachments.get`: one attachment payload
//!
//! Responses are deserialized into the typed structures in [`types`] once,
//! at the provider boundary; fields the API may omit are explicit
//! `Option`s. Calls are sequential; there is no retry, backoff, or
//! concurrent fetching in this client.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
pub mod types;

pub use client::GmailClient;
pub use error::{Error, Result};
