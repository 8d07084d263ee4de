//! Typed Gmail API wire payloads.
//!
//! These mirror the JSON bodies of `users.messages.list`,
//! `users.messages.get`, and `users.messages.attachments.get`. Fields the
//! API may omit (empty result pages, bodies without attachment ids,
//! messages without parts) are explicit `Option`s or defaulted containers,
//! so missing data is handled here and nowhere else.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

/// URL-safe base64, tolerant of both padded and unpadded payloads.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One page of a `users.messages.list` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageList {
    /// Message references on this page. Absent entirely when the query
    /// matches nothing.
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    /// Continuation cursor; absent on the last page.
    pub next_page_token: Option<String>,
    /// Approximate total result count.
    pub result_size_estimate: Option<u64>,
}

/// Reference to a message, as returned by the list operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    /// Message identifier, unique per mailbox.
    pub id: String,
    /// Thread the message belongs to.
    pub thread_id: Option<String>,
}

/// Full message detail from `users.messages.get`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier.
    pub id: String,
    /// Short HTML-escaped preview of the message body.
    #[serde(default)]
    pub snippet: String,
    /// Structured payload (headers and MIME parts).
    pub payload: Option<MessagePayload>,
    /// Internal receipt timestamp, epoch milliseconds as a string.
    pub internal_date: Option<String>,
    /// The raw response body this message was parsed from, retained for
    /// passthrough.
    #[serde(skip)]
    pub raw: serde_json::Value,
}

/// Message payload: top-level headers and MIME parts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    /// Header list in provider order.
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Top-level MIME parts. Absent for single-part messages.
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

/// A single message header.
#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    /// Header name (e.g. `From`).
    pub name: String,
    /// Header value.
    pub value: String,
}

/// One MIME part of a message payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    /// Declared file name. Empty for inline bodies.
    #[serde(default)]
    pub filename: String,
    /// Part body descriptor.
    pub body: Option<PartBody>,
}

/// Body descriptor of a MIME part.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartBody {
    /// Attachment identifier, present when the part's data must be fetched
    /// separately.
    pub attachment_id: Option<String>,
    /// Inline data, URL-safe base64. Present for small bodies only.
    pub data: Option<String>,
    /// Body size in bytes.
    pub size: Option<u64>,
}

/// Attachment payload from `users.messages.attachments.get`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentBody {
    /// Payload, URL-safe base64 text.
    pub data: String,
    /// Decoded size in bytes.
    pub size: Option<u64>,
}

impl AttachmentBody {
    /// Decodes the payload to raw bytes.
    ///
    /// The entire decoded payload is held in memory; there is no streaming.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid URL-safe base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        URL_SAFE_LENIENT.decode(&self.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_page_with_cursor() {
        let json = r#"{
            "messages": [
                {"id": "m1", "threadId": "t1"},
                {"id": "m2", "threadId": "t1"}
            ],
            "nextPageToken": "page-2",
            "resultSizeEstimate": 6
        }"#;

        let page: MessageList = serde_json::from_str(json).unwrap();
        assert_eq!(page.messages.len(), 2);
        assert_eq!(page.messages[0].id, "m1");
        assert_eq!(page.next_page_token.as_deref(), Some("page-2"));
    }

    #[test]
    fn test_empty_list_page() {
        // A query with no matches omits "messages" entirely.
        let json = r#"{"resultSizeEstimate": 0}"#;

        let page: MessageList = serde_json::from_str(json).unwrap();
        assert!(page.messages.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_message_with_attachment_part() {
        let json = r#"{
            "id": "m1",
            "snippet": "see attached",
            "internalDate": "1700000000000",
            "payload": {
                "headers": [
                    {"name": "From", "value": "alice@example.com"},
                    {"name": "Subject", "value": "report"}
                ],
                "parts": [
                    {"filename": "", "body": {"size": 42}},
                    {"filename": "report.pdf", "body": {"attachmentId": "att-1", "size": 9000}}
                ]
            }
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        let payload = msg.payload.unwrap();
        assert_eq!(payload.headers.len(), 2);
        assert_eq!(payload.parts.len(), 2);
        // Inline body part has no attachment id
        assert!(payload.parts[0].body.as_ref().unwrap().attachment_id.is_none());
        assert_eq!(
            payload.parts[1].body.as_ref().unwrap().attachment_id.as_deref(),
            Some("att-1")
        );
    }

    #[test]
    fn test_message_without_parts() {
        let json = r#"{
            "id": "m1",
            "snippet": "plain",
            "payload": {"headers": []}
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(msg.payload.unwrap().parts.is_empty());
    }

    #[test]
    fn test_attachment_decode_unpadded() {
        // "hello" without padding, as Gmail returns it
        let body = AttachmentBody {
            data: "aGVsbG8".to_string(),
            size: Some(5),
        };
        assert_eq!(body.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_attachment_decode_padded() {
        let body = AttachmentBody {
            data: "aGVsbG8=".to_string(),
            size: Some(5),
        };
        assert_eq!(body.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_attachment_decode_url_safe_alphabet() {
        // 0xfb 0xff encodes to "-_8" in the URL-safe alphabet
        let body = AttachmentBody {
            data: "-_8".to_string(),
            size: Some(2),
        };
        assert_eq!(body.decode().unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_attachment_decode_invalid() {
        let body = AttachmentBody {
            data: "not base64!".to_string(),
            size: None,
        };
        assert!(body.decode().is_err());
    }
}
