//! Channel-to-project routing.
//!
//! The registry holds no state of its own; it is a set of functions over
//! the configuration owned by the caller. A channel id appears in at most
//! one project's channel list at any time, and channels without a binding
//! route to the project named `"empty"`.

pub mod error;
pub mod registry;

pub use {
    error::{Error, Result},
    registry::{bind, resolve},
};
