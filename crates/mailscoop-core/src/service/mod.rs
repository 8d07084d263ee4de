//! High-level operations: credential wiring and the batch download run.

mod auth;
mod download;

pub use auth::load_or_refresh_token;
pub use download::{
    DownloadReport, collect_message_ids, download_recent_attachments, fetch_messages,
    recent_query, save_attachment,
};
