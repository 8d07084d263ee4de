//! Conversion of raw provider messages into [`Email`] records.
//!
//! Normalization never fails: absent headers become empty strings, an
//! unparsable `Date` header becomes `None`, and parts that are not
//! attachments are skipped.

use chrono::{DateTime, FixedOffset};
use mailscoop_gmail::types::{Header, Message};
use tracing::debug;

use super::model::{AttachmentRef, Email};

/// Looks up a header value by exact name, scanning in provider order.
///
/// Returns an empty string when the header is absent.
#[must_use]
pub fn header_value(headers: &[Header], name: &str) -> String {
    headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.clone())
        .unwrap_or_default()
}

/// Splits a CC header value on commas, preserving order.
///
/// An absent (empty) header yields an empty collection. Entries are not
/// trimmed; the header value is carried as-is.
fn split_cc(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

/// Leniently parses a `Date` header into a timestamp.
///
/// Tries RFC 2822 (with any trailing comment such as `(UTC)` stripped),
/// then RFC 3339. Any failure yields `None` rather than an error.
fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw
        .split_once('(')
        .map_or(raw, |(before, _)| before)
        .trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .ok()
}

/// Decodes the HTML entities the provider escapes snippet text with.
///
/// `&amp;` is resolved last so entity names are not double-resolved.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Extracts attachment references from a message's top-level parts.
///
/// Only parts with a non-empty file name AND a present attachment id are
/// attachments; inline bodies have neither and are skipped.
fn extract_attachments(message: &Message, user_id: &str) -> Vec<AttachmentRef> {
    let Some(payload) = &message.payload else {
        return Vec::new();
    };

    payload
        .parts
        .iter()
        .filter_map(|part| {
            if part.filename.is_empty() {
                return None;
            }
            let attachment_id = part.body.as_ref()?.attachment_id.as_ref()?;
            Some(AttachmentRef {
                attachment_id: attachment_id.clone(),
                message_id: message.id.clone(),
                user_id: user_id.to_string(),
                file_name: part.filename.clone(),
            })
        })
        .collect()
}

/// Normalizes a raw provider message into an [`Email`].
#[must_use]
pub fn normalize_message(message: Message, user_id: &str) -> Email {
    let headers = message
        .payload
        .as_ref()
        .map(|p| p.headers.as_slice())
        .unwrap_or_default();

    let from_address = header_value(headers, "From");
    let to_address = header_value(headers, "To");
    let cc_addresses = split_cc(&header_value(headers, "Cc"));
    let subject = header_value(headers, "Subject");
    let date_raw = header_value(headers, "Date");
    let date_received = parse_date(&date_raw);
    if date_received.is_none() && !date_raw.is_empty() {
        debug!(message_id = %message.id, date = %date_raw, "unparsable Date header");
    }

    let attachments = extract_attachments(&message, user_id);
    let snippet = decode_entities(&message.snippet);

    Email {
        message_id: message.id,
        from_address,
        to_address,
        cc_addresses,
        subject,
        snippet,
        date_received,
        raw: message.raw,
        attachments,
    }
}
