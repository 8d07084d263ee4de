//! Integration tests for the batch download run.
//!
//! These use a fake in-memory mailbox so no network is involved; the fake
//! counts attachment fetches to verify the ledger actually prevents
//! re-downloads.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use mailscoop_core::{Error, Ledger, Mailbox, collect_message_ids, download_recent_attachments};
use mailscoop_gmail::types::{AttachmentBody, Message, MessageList, MessageRef};

/// In-memory mailbox: a fixed sequence of listing pages, message bodies by
/// id, and attachment payloads by (message id, attachment id).
struct FakeMailbox {
    pages: Vec<MessageList>,
    messages: HashMap<String, serde_json::Value>,
    attachments: HashMap<(String, String), String>,
    attachment_fetches: AtomicUsize,
}

impl FakeMailbox {
    fn new(pages: Vec<MessageList>) -> Self {
        Self {
            pages,
            messages: HashMap::new(),
            attachments: HashMap::new(),
            attachment_fetches: AtomicUsize::new(0),
        }
    }

    fn with_message(mut self, id: &str, raw: serde_json::Value) -> Self {
        self.messages.insert(id.to_string(), raw);
        self
    }

    fn with_attachment(mut self, message_id: &str, attachment_id: &str, data: &str) -> Self {
        self.attachments.insert(
            (message_id.to_string(), attachment_id.to_string()),
            data.to_string(),
        );
        self
    }

    fn attachment_fetches(&self) -> usize {
        self.attachment_fetches.load(Ordering::SeqCst)
    }
}

impl Mailbox for FakeMailbox {
    fn user_id(&self) -> &str {
        "me"
    }

    async fn list_messages(
        &self,
        _query: &str,
        page_token: Option<&str>,
    ) -> mailscoop_gmail::Result<MessageList> {
        let index: usize = page_token.map_or(0, |t| t.parse().unwrap());
        Ok(self.pages[index].clone())
    }

    async fn get_message(&self, message_id: &str) -> mailscoop_gmail::Result<Message> {
        let raw = self.messages.get(message_id).cloned().unwrap_or_else(|| {
            panic!("fake mailbox has no message {message_id}");
        });
        let mut message: Message = serde_json::from_value(raw.clone())?;
        message.raw = raw;
        Ok(message)
    }

    async fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> mailscoop_gmail::Result<AttachmentBody> {
        self.attachment_fetches.fetch_add(1, Ordering::SeqCst);
        let key = (message_id.to_string(), attachment_id.to_string());
        match self.attachments.get(&key) {
            Some(data) => Ok(AttachmentBody {
                data: data.clone(),
                size: None,
            }),
            None => Err(mailscoop_gmail::Error::Api {
                status: 404,
                message: format!("no attachment {attachment_id} on {message_id}"),
            }),
        }
    }
}

fn page(ids: &[&str], next: Option<&str>) -> MessageList {
    MessageList {
        messages: ids
            .iter()
            .map(|id| MessageRef {
                id: (*id).to_string(),
                thread_id: None,
            })
            .collect(),
        next_page_token: next.map(str::to_string),
        result_size_estimate: None,
    }
}

fn message_with_attachment(id: &str, file_name: &str, attachment_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "snippet": "see attached",
        "payload": {
            "headers": [
                {"name": "From", "value": "alice@example.com"},
                {"name": "To", "value": "me@example.com"},
                {"name": "Subject", "value": "report"},
                {"name": "Date", "value": "Mon, 5 Aug 2024 10:00:00 +0000"}
            ],
            "parts": [
                {"filename": "", "body": {"size": 10}},
                {"filename": file_name, "body": {"attachmentId": attachment_id}}
            ]
        }
    })
}

#[tokio::test]
async fn pagination_collects_all_pages_without_repeats() {
    let mailbox = FakeMailbox::new(vec![
        page(&["m1", "m2"], Some("1")),
        page(&["m3", "m4"], Some("2")),
        page(&["m5", "m6"], None),
    ]);

    let ids = collect_message_ids(&mailbox, "newer_than:2d").await.unwrap();
    assert_eq!(ids, vec!["m1", "m2", "m3", "m4", "m5", "m6"]);

    let unique: std::collections::HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), 6);
}

#[tokio::test]
async fn pagination_empty_first_page_is_empty_result() {
    let mailbox = FakeMailbox::new(vec![page(&[], None)]);

    let ids = collect_message_ids(&mailbox, "newer_than:2d").await.unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn run_downloads_attachment_and_records_slug() {
    let dir = tempfile::tempdir().unwrap();
    let download_dir = dir.path().join("attachments");
    let ledger = Ledger::new(dir.path().join("visited.txt"));

    // "hello" in URL-safe base64
    let mailbox = FakeMailbox::new(vec![page(&["m1"], None)])
        .with_message("m1", message_with_attachment("m1", "invoice.pdf", "att-1"))
        .with_attachment("m1", "att-1", "aGVsbG8");

    let report = download_recent_attachments(&mailbox, &ledger, 2, &download_dir)
        .await
        .unwrap();
    assert_eq!(report.fetched, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.attachments_saved, 1);

    let slugs = ledger.read().unwrap();
    assert_eq!(slugs.len(), 1);

    let expected = download_dir.join(format!("{}.invoice.pdf", slugs[0]));
    assert_eq!(fs::read(expected).unwrap(), b"hello");
}

#[tokio::test]
async fn second_run_skips_visited_message() {
    let dir = tempfile::tempdir().unwrap();
    let download_dir = dir.path().join("attachments");
    let ledger = Ledger::new(dir.path().join("visited.txt"));

    let mailbox = FakeMailbox::new(vec![page(&["m1"], None)])
        .with_message("m1", message_with_attachment("m1", "invoice.pdf", "att-1"))
        .with_attachment("m1", "att-1", "aGVsbG8");

    download_recent_attachments(&mailbox, &ledger, 2, &download_dir)
        .await
        .unwrap();
    assert_eq!(mailbox.attachment_fetches(), 1);

    let report = download_recent_attachments(&mailbox, &ledger, 2, &download_dir)
        .await
        .unwrap();
    assert_eq!(mailbox.attachment_fetches(), 1, "attachment refetched");
    assert_eq!(report.skipped, 1);
    assert_eq!(report.attachments_saved, 0);

    // The ledger still holds the slug exactly once
    assert_eq!(ledger.read().unwrap().len(), 1);
}

#[tokio::test]
async fn corrupt_attachment_payload_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let download_dir = dir.path().join("attachments");
    let ledger = Ledger::new(dir.path().join("visited.txt"));

    let mailbox = FakeMailbox::new(vec![page(&["m1"], None)])
        .with_message("m1", message_with_attachment("m1", "bad.bin", "att-1"))
        .with_attachment("m1", "att-1", "not base64!");

    let err = download_recent_attachments(&mailbox, &ledger, 2, &download_dir)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Attachment { ref file_name, .. } if file_name == "bad.bin"));

    // Aborted before the ledger update
    assert!(ledger.read().unwrap().is_empty());
}

#[tokio::test]
async fn missing_attachment_is_a_provider_error() {
    let dir = tempfile::tempdir().unwrap();
    let download_dir = dir.path().join("attachments");
    let ledger = Ledger::new(dir.path().join("visited.txt"));

    let mailbox = FakeMailbox::new(vec![page(&["m1"], None)])
        .with_message("m1", message_with_attachment("m1", "gone.pdf", "att-404"));

    let err = download_recent_attachments(&mailbox, &ledger, 2, &download_dir)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Provider(_)));
}
