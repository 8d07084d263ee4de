//! # mailscoop-core
//!
//! Core domain logic for the `MailScoop` Gmail attachment downloader.
//!
//! This crate provides:
//! - Message normalization (headers, CC lists, dates, snippets, attachments)
//! - Slug derivation used as the de-duplication key
//! - The append-only ledger of processed messages
//! - The [`Mailbox`] seam over the hosted mailbox provider
//! - The batch orchestrator ("download all attachments from the last N days")
//!
//! Execution is sequential throughout: one provider call at a time, no
//! retries, no concurrent fetching. The ledger assumes a single scheduled
//! job per mailbox; concurrent runs may race on read-modify-append.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
pub mod ledger;
pub mod mailbox;
pub mod message;
pub mod service;

pub use error::{AttachmentError, Error, Result};
pub use ledger::{DEFAULT_LEDGER_FILE, Ledger};
pub use mailbox::Mailbox;
pub use message::{AttachmentRef, Email, header_value, normalize_message};
pub use service::{
    DownloadReport, collect_message_ids, download_recent_attachments, fetch_messages,
    load_or_refresh_token, recent_query, save_attachment,
};
