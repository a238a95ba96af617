//! serenity-backed chat adapter: gateway event handler plus the
//! [`ChatClient`](codebot_channel::ChatClient) implementation over the
//! Discord HTTP API.

pub mod client;
pub mod handler;

pub use {client::DiscordClient, handler::DiscordHandler};
