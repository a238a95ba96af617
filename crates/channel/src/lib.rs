//! Chat-surface boundary shared by the command layer, the pipeline, and
//! the platform adapter: inbound message types, attachment
//! classification, the outbound [`ChatClient`] trait, and outcome
//! rendering.

pub mod attachment;
pub mod client;
pub mod event;
pub mod render;

pub use {
    attachment::{Attachment, AttachmentKind, classify, select},
    client::ChatClient,
    event::{InboundMessage, MessageHandle},
    render::Outcome,
};
