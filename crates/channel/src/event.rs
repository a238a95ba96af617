use crate::attachment::Attachment;

/// One inbound chat message, as delivered by the platform adapter.
///
/// Consumed entirely within a single command dispatch or pipeline run.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Platform message id, used for the cleanup delete.
    pub id: String,
    pub author_id: String,
    pub channel_id: String,
    pub content: String,
    pub attachments: Vec<Attachment>,
}

/// Handle to a message the bot itself sent, for later in-place edits.
#[derive(Debug, Clone)]
pub struct MessageHandle {
    pub channel_id: String,
    pub message_id: String,
}
