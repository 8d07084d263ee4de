//! Message data models.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;

/// Forwarded-message marker embedded in snippet text: `From: <addr>` where
/// addr is a non-whitespace run containing `@`.
static FORWARDED_FROM: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a literal
    let re = Regex::new(r"From: <(\S+@\S+)>").unwrap();
    re
});

/// A normalized email message.
///
/// Constructed once per fetch from provider data and immutable thereafter.
#[derive(Debug, Clone)]
pub struct Email {
    /// Provider message identifier, unique per mailbox.
    pub message_id: String,
    /// Literal `From` header value.
    pub from_address: String,
    /// Literal `To` header value.
    pub to_address: String,
    /// CC addresses in header order; empty when the header is absent.
    pub cc_addresses: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Preview text with HTML entities decoded.
    pub snippet: String,
    /// Receipt timestamp from the `Date` header; `None` if unparsable.
    pub date_received: Option<DateTime<FixedOffset>>,
    /// Raw provider payload, retained for passthrough.
    pub raw: serde_json::Value,
    /// Attachment references carried by this message.
    pub attachments: Vec<AttachmentRef>,
}

impl Email {
    /// Sender address parsed out of a forwarded-message marker in the
    /// snippet, if present.
    #[must_use]
    pub fn forwarded_from_address(&self) -> Option<String> {
        FORWARDED_FROM
            .captures(&self.snippet)
            .map(|caps| caps[1].to_string())
    }

    /// The sender used for slug derivation: the forwarded-from address when
    /// the snippet carries one, otherwise the literal `From` header.
    #[must_use]
    pub fn effective_sender(&self) -> String {
        self.forwarded_from_address()
            .unwrap_or_else(|| self.from_address.clone())
    }

    /// Filesystem-safe de-duplication key for this message.
    ///
    /// Computed from (message id, effective sender, subject) with every
    /// non-word character replaced by a dash. Deterministic for the same
    /// message and stable across runs; the ledger is keyed on it.
    #[must_use]
    pub fn slug(&self) -> String {
        let source = format!(
            "{}-{}-{}",
            self.message_id,
            self.effective_sender(),
            self.subject
        );
        source
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '-' })
            .collect()
    }
}

/// Reference to one attachment of a message.
///
/// Pure data: the payload is fetched on demand at save time through an
/// injected [`crate::Mailbox`], never held here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// Provider attachment identifier.
    pub attachment_id: String,
    /// Identifier of the parent message.
    pub message_id: String,
    /// Owning account identifier.
    pub user_id: String,
    /// Declared file name.
    pub file_name: String,
}
