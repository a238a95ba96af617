use std::sync::Arc;

use tracing::{debug, warn};

use {
    codebot_channel::{ChatClient, InboundMessage, render},
    codebot_commands::CommandOrigin,
    codebot_config::SharedConfig,
    codebot_pipeline::SubmissionPipeline,
};

use crate::welcome;

/// Routes each inbound message to the command dispatcher or the
/// submission pipeline. Messages in channels that are not enabled (and
/// are not commands) are dropped.
pub struct Gateway {
    config: SharedConfig,
    pipeline: Arc<SubmissionPipeline>,
    client: Arc<dyn ChatClient>,
}

impl Gateway {
    pub fn new(
        config: SharedConfig,
        pipeline: Arc<SubmissionPipeline>,
        client: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            config,
            pipeline,
            client,
        }
    }

    /// Handle one inbound message. The platform adapter has already
    /// filtered out the bot's own messages.
    pub async fn handle_message(&self, message: InboundMessage) {
        let origin = CommandOrigin {
            author_id: message.author_id.clone(),
            channel_id: message.channel_id.clone(),
        };
        // Commands work in any channel, enabled or not; chadd has to run
        // somewhere before the channel is enabled.
        if let Some(reply) = codebot_commands::dispatch(&self.config, &origin, &message.content) {
            let reply = format!("{}, {reply}", render::mention(&message.author_id));
            if let Err(e) = self.client.send(&message.channel_id, &reply, &[]).await {
                warn!(channel_id = %message.channel_id, error = %e, "failed to send command reply");
            }
            return;
        }

        let enabled = {
            let guard = self.config.read().unwrap_or_else(|e| e.into_inner());
            guard
                .config()
                .channels
                .iter()
                .any(|c| c == &message.channel_id)
        };
        if !enabled {
            debug!(channel_id = %message.channel_id, "channel not enabled, ignoring");
            return;
        }

        self.pipeline.handle(&message).await;
    }

    /// Greet every enabled channel, once, at startup.
    pub async fn announce_startup(&self) {
        welcome::announce_startup(&self.config, self.client.as_ref()).await;
    }
}
