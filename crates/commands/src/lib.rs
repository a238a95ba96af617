//! The administrative command layer.
//!
//! Commands are ordinary chat messages prefixed with `!codebot`. The
//! dispatcher parses them, enforces the admin gate, applies the mutation
//! in-memory, and persists the configuration before acknowledging.

pub mod dispatch;
pub mod parse;

pub use {
    dispatch::{CommandOrigin, dispatch},
    parse::{COMMAND_PREFIX, ParsedCommand, parse},
};
