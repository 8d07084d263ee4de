//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
///
/// The variants correspond to the distinguishable failure categories of a
/// run: credential acquisition, provider calls, attachment materialization,
/// and local filesystem work. Date-parse failures are not an error at all;
/// they are recovered during normalization.
#[derive(Debug, Error)]
pub enum Error {
    /// Credential acquisition or refresh failed. Fatal before any fetch.
    #[error("Credential error: {0}")]
    Credential(#[from] mailscoop_oauth::Error),

    /// Provider call failed (network, quota, malformed response). Fatal,
    /// no retry.
    #[error("Provider error: {0}")]
    Provider(#[from] mailscoop_gmail::Error),

    /// An attachment could not be materialized to disk.
    #[error("Attachment {file_name:?}: {source}")]
    Attachment {
        /// Declared file name of the attachment.
        file_name: String,
        /// What went wrong.
        #[source]
        source: AttachmentError,
    },

    /// Ledger or filesystem I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What went wrong while materializing an attachment.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// Payload was not valid URL-safe base64.
    #[error("payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Writing the decoded bytes failed.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
