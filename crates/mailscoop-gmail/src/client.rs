//! Gmail REST API client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{AttachmentBody, Message, MessageList};

/// Base URL of the Gmail REST API.
const API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";

/// Authenticated-user alias accepted by every Gmail endpoint.
const DEFAULT_USER_ID: &str = "me";

/// Client for a single user's mailbox.
///
/// Carries a bearer access token obtained from `mailscoop-oauth`; every
/// method is one blocking-by-await HTTPS call with no retry.
#[derive(Debug, Clone)]
pub struct GmailClient {
    http_client: Client,
    access_token: String,
    user_id: String,
}

impl GmailClient {
    /// Creates a client for the authenticated user (`me`).
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            access_token: access_token.into(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }

    /// Sets an explicit user id instead of `me`.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Returns the user id requests are issued for.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Fetches one page of message ids matching a search query.
    ///
    /// Pass the `next_page_token` of the previous page to continue; a page
    /// without a token is the last one.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success API status.
    pub async fn list_messages(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<MessageList> {
        let url = format!("{API_BASE}/users/{}/messages", self.user_id);

        let mut params = vec![("q", query)];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        debug!(query, page_token, "listing messages");
        self.get_json(&url, &params).await
    }

    /// Fetches full message detail by id.
    ///
    /// The response is validated into a typed [`Message`] once, here; the
    /// untyped body is retained on [`Message::raw`] for passthrough.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success API status, or
    /// an unexpected response shape.
    pub async fn get_message(&self, message_id: &str) -> Result<Message> {
        let url = format!("{API_BASE}/users/{}/messages/{message_id}", self.user_id);

        debug!(message_id, "fetching message");
        let raw: serde_json::Value = self.get_json(&url, &[]).await?;
        let mut message: Message = serde_json::from_value(raw.clone())?;
        message.raw = raw;
        Ok(message)
    }

    /// Fetches one attachment payload.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success API status.
    pub async fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> Result<AttachmentBody> {
        let url = format!(
            "{API_BASE}/users/{}/messages/{message_id}/attachments/{attachment_id}",
            self.user_id
        );

        debug!(message_id, attachment_id, "fetching attachment");
        self.get_json(&url, &[]).await
    }

    /// Issues a bearer-authenticated GET and parses the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
