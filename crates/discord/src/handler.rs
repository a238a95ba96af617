//! Discord event handler for serenity.

use std::sync::Arc;

use {
    serenity::{
        all::{Context, EventHandler, GatewayIntents, Message, Ready},
        async_trait,
    },
    tracing::{debug, info},
};

use {
    codebot_channel::{Attachment, InboundMessage},
    codebot_gateway::Gateway,
};

/// Handler for Discord gateway events. Converts serenity messages into
/// the channel crate's inbound type and hands them to the gateway.
pub struct DiscordHandler {
    gateway: Arc<Gateway>,
}

impl DiscordHandler {
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Required gateway intents for the bot.
    #[must_use]
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "discord bot ready"
        );
        self.gateway.announce_startup().await;
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        // Skip bot messages to prevent loops.
        if msg.author.bot {
            return;
        }

        debug!(
            channel_id = %msg.channel_id,
            author_id = %msg.author.id,
            attachments = msg.attachments.len(),
            "inbound message"
        );

        let message = InboundMessage {
            id: msg.id.to_string(),
            author_id: msg.author.id.to_string(),
            channel_id: msg.channel_id.to_string(),
            content: msg.content.clone(),
            attachments: msg
                .attachments
                .iter()
                .map(|a| Attachment { url: a.url.clone() })
                .collect(),
        };

        self.gateway.handle_message(message).await;
    }
}
