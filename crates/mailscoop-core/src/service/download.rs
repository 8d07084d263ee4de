//! The batch download run and its building blocks.
//!
//! Everything here is sequential: pages are walked one at a time, messages
//! fetched one at a time, attachments saved one at a time. The first
//! provider or attachment error aborts the run; the ledger keeps whatever
//! it captured at its last append.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{AttachmentError, Error, Result};
use crate::ledger::Ledger;
use crate::mailbox::Mailbox;
use crate::message::{AttachmentRef, Email, normalize_message};

/// Outcome counts of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Messages matched by the query.
    pub fetched: usize,
    /// Messages skipped because their slug was already in the ledger.
    pub skipped: usize,
    /// Attachment files written.
    pub attachments_saved: usize,
}

/// Search filter for messages received within the last `days` days.
#[must_use]
pub fn recent_query(days: u32) -> String {
    format!("newer_than:{days}d")
}

/// Collects the complete set of message ids matching `query`.
///
/// Walks the paged listing, following the continuation cursor until none
/// is returned. A first page with zero results yields an empty collection.
///
/// # Errors
///
/// Returns a provider error if any page fetch fails; there is no retry.
pub async fn collect_message_ids<M: Mailbox>(mailbox: &M, query: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = mailbox.list_messages(query, page_token.as_deref()).await?;
        ids.extend(page.messages.into_iter().map(|m| m.id));

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    debug!(count = ids.len(), query, "collected message ids");
    Ok(ids)
}

/// Fetches and normalizes every message matching `query`.
///
/// # Errors
///
/// Returns a provider error if listing or any get-by-id call fails.
pub async fn fetch_messages<M: Mailbox>(mailbox: &M, query: &str) -> Result<Vec<Email>> {
    let ids = collect_message_ids(mailbox, query).await?;

    let mut emails = Vec::with_capacity(ids.len());
    for id in ids {
        let message = mailbox.get_message(&id).await?;
        emails.push(normalize_message(message, mailbox.user_id()));
    }

    Ok(emails)
}

/// Fetches one attachment payload and writes it to `path`, overwriting any
/// existing file.
///
/// The whole decoded payload is held in memory before the write; there is
/// no streaming and no checksum.
///
/// # Errors
///
/// A failed fetch is a provider error; a failed decode or write is an
/// attachment error. Either aborts the run.
pub async fn save_attachment<M: Mailbox>(
    mailbox: &M,
    attachment: &AttachmentRef,
    path: &Path,
) -> Result<()> {
    let body = mailbox
        .get_attachment(&attachment.message_id, &attachment.attachment_id)
        .await?;

    let bytes = body.decode().map_err(|e| Error::Attachment {
        file_name: attachment.file_name.clone(),
        source: AttachmentError::Decode(e),
    })?;

    fs::write(path, &bytes).map_err(|e| Error::Attachment {
        file_name: attachment.file_name.clone(),
        source: AttachmentError::Write(e),
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "saved attachment");
    Ok(())
}

/// Downloads all attachments from messages received within the last
/// `days` days into `download_dir`, skipping messages already in the
/// ledger.
///
/// Attachments land at `{download_dir}/{slug}.{file_name}`; the directory
/// is created if missing. After all messages are processed, the slugs of
/// ALL fetched messages are appended to the ledger (the append itself
/// skips entries already present). There is no transactional guarantee
/// between the downloads and the ledger update: a crash in between means
/// the affected message is re-downloaded next run (overwritten, not
/// duplicated).
///
/// # Errors
///
/// Returns the first provider, attachment, or I/O error encountered;
/// the run aborts rather than skipping the failed item.
pub async fn download_recent_attachments<M: Mailbox>(
    mailbox: &M,
    ledger: &Ledger,
    days: u32,
    download_dir: &Path,
) -> Result<DownloadReport> {
    let query = recent_query(days);
    info!(%query, dir = %download_dir.display(), "starting download run");

    let emails = fetch_messages(mailbox, &query).await?;
    let visited: HashSet<String> = ledger.read()?.into_iter().collect();

    fs::create_dir_all(download_dir)?;

    let mut report = DownloadReport {
        fetched: emails.len(),
        ..DownloadReport::default()
    };

    for email in &emails {
        let slug = email.slug();
        if visited.contains(&slug) {
            debug!(%slug, "already visited, skipping");
            report.skipped += 1;
            continue;
        }

        for attachment in &email.attachments {
            let path = download_dir.join(format!("{slug}.{}", attachment.file_name));
            save_attachment(mailbox, attachment, &path).await?;
            report.attachments_saved += 1;
        }
    }

    let slugs: Vec<String> = emails.iter().map(Email::slug).collect();
    let appended = ledger.append(&slugs)?;

    info!(
        fetched = report.fetched,
        skipped = report.skipped,
        saved = report.attachments_saved,
        appended,
        "download run complete"
    );
    Ok(report)
}
