//! Outbound Discord messaging over the serenity HTTP API.

use std::sync::Arc;

use {
    anyhow::{Context as _, Result},
    async_trait::async_trait,
    serenity::{
        all::{ChannelId, CreateAttachment, CreateMessage, EditMessage, MessageId},
        http::Http,
    },
    tracing::debug,
};

use codebot_channel::{Attachment, ChatClient, MessageHandle};

/// Discord caps message content at 2000 characters.
pub const DISCORD_MAX_MESSAGE_LEN: usize = 2000;

/// [`ChatClient`] implementation talking to Discord.
pub struct DiscordClient {
    http: Arc<Http>,
}

impl DiscordClient {
    #[must_use]
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatClient for DiscordClient {
    async fn send(
        &self,
        channel_id: &str,
        content: &str,
        attachments: &[Attachment],
    ) -> Result<MessageHandle> {
        let channel = parse_channel(channel_id)?;
        let mut builder = CreateMessage::new().content(truncate_content(content));
        for attachment in attachments {
            builder = builder.add_file(
                CreateAttachment::url(&self.http, &attachment.url)
                    .await
                    .with_context(|| format!("failed to re-attach {}", attachment.url))?,
            );
        }
        let message = channel
            .send_message(&self.http, builder)
            .await
            .with_context(|| format!("failed to send message to channel {channel_id}"))?;
        debug!(channel_id, message_id = %message.id, "message sent");
        Ok(MessageHandle {
            channel_id: channel_id.to_string(),
            message_id: message.id.to_string(),
        })
    }

    async fn edit(&self, handle: &MessageHandle, content: &str) -> Result<()> {
        let channel = parse_channel(&handle.channel_id)?;
        let message = parse_message(&handle.message_id)?;
        channel
            .edit_message(
                &self.http,
                message,
                EditMessage::new().content(truncate_content(content)),
            )
            .await
            .with_context(|| format!("failed to edit message {}", handle.message_id))?;
        Ok(())
    }

    async fn delete(&self, channel_id: &str, message_id: &str) -> Result<()> {
        let channel = parse_channel(channel_id)?;
        let message = parse_message(message_id)?;
        channel
            .delete_message(&self.http, message)
            .await
            .with_context(|| format!("failed to delete message {message_id}"))?;
        Ok(())
    }
}

fn parse_channel(channel_id: &str) -> Result<ChannelId> {
    let id = channel_id
        .parse::<u64>()
        .with_context(|| format!("invalid channel id: {channel_id}"))?;
    Ok(ChannelId::new(id))
}

fn parse_message(message_id: &str) -> Result<MessageId> {
    let id = message_id
        .parse::<u64>()
        .with_context(|| format!("invalid message id: {message_id}"))?;
    Ok(MessageId::new(id))
}

/// Truncate at a char boundary to fit Discord's message length cap.
fn truncate_content(content: &str) -> &str {
    if content.len() <= DISCORD_MAX_MESSAGE_LEN {
        return content;
    }
    let mut end = DISCORD_MAX_MESSAGE_LEN;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_untouched() {
        assert_eq!(truncate_content("hello"), "hello");
    }

    #[test]
    fn long_content_is_capped() {
        let long = "x".repeat(DISCORD_MAX_MESSAGE_LEN + 100);
        assert_eq!(truncate_content(&long).len(), DISCORD_MAX_MESSAGE_LEN);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "é".repeat(DISCORD_MAX_MESSAGE_LEN);
        let truncated = truncate_content(&long);
        assert!(truncated.len() <= DISCORD_MAX_MESSAGE_LEN);
        assert!(long.is_char_boundary(truncated.len()));
    }

    #[test]
    fn non_numeric_channel_id_is_rejected() {
        assert!(parse_channel("not-a-snowflake").is_err());
    }
}
