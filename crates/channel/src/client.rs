use {anyhow::Result, async_trait::async_trait};

use crate::{attachment::Attachment, event::MessageHandle};

/// Outbound surface of the chat platform.
///
/// Implemented by the platform adapter; the command layer and the
/// pipeline talk only to this trait. Transport, reconnection, and rate
/// limiting stay on the adapter's side of the boundary.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Post a message, optionally re-attaching files, and return a handle
    /// for later edits.
    async fn send(
        &self,
        channel_id: &str,
        content: &str,
        attachments: &[Attachment],
    ) -> Result<MessageHandle>;

    /// Replace the content of a message the bot sent earlier.
    async fn edit(&self, handle: &MessageHandle, content: &str) -> Result<()>;

    /// Delete a message by id.
    async fn delete(&self, channel_id: &str, message_id: &str) -> Result<()>;
}
