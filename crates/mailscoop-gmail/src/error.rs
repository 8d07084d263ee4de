//! Error types for Gmail API operations.

/// Result type alias for Gmail API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Gmail API error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status from the API.
    #[error("Gmail API error: HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the API.
        message: String,
    },
}
