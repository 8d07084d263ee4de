//! The seam between the orchestrator and the hosted mailbox provider.

use mailscoop_gmail::GmailClient;
use mailscoop_gmail::types::{AttachmentBody, Message, MessageList};

/// Read-side operations a hosted mailbox must provide.
///
/// The three operations mirror the provider's paged listing, get-by-id, and
/// attachment endpoints. The orchestrator and the attachment save path take
/// the mailbox as an explicit parameter, so value types like
/// [`crate::AttachmentRef`] stay pure data and tests can substitute a fake.
pub trait Mailbox {
    /// Account identifier the operations act on.
    fn user_id(&self) -> &str;

    /// Fetches one page of message references matching `query`, continuing
    /// from `page_token` when given.
    fn list_messages(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> impl Future<Output = mailscoop_gmail::Result<MessageList>>;

    /// Fetches full message detail by id.
    fn get_message(
        &self,
        message_id: &str,
    ) -> impl Future<Output = mailscoop_gmail::Result<Message>>;

    /// Fetches one attachment payload.
    fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> impl Future<Output = mailscoop_gmail::Result<AttachmentBody>>;
}

impl Mailbox for GmailClient {
    fn user_id(&self) -> &str {
        self.user_id()
    }

    async fn list_messages(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> mailscoop_gmail::Result<MessageList> {
        self.list_messages(query, page_token).await
    }

    async fn get_message(&self, message_id: &str) -> mailscoop_gmail::Result<Message> {
        self.get_message(message_id).await
    }

    async fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> mailscoop_gmail::Result<AttachmentBody> {
        self.get_attachment(message_id, attachment_id).await
    }
}
