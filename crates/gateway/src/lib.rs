//! Event routing: decides whether an inbound message is an
//! administrative command, an eligible submission, or noise.

pub mod router;
pub mod welcome;

pub use {router::Gateway, welcome::announce_startup};
