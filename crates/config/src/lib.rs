//! Configuration loading, validation, and persistence.
//!
//! Config files: `codebot.toml`, `codebot.yaml`, or `codebot.json` — the
//! format is inferred from the file extension and preserved on save.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod error;
mod loader;
pub mod schema;
pub mod store;
pub mod validate;

pub use {
    error::{Error, Result},
    schema::{CheckConfig, CodebotConfig, FALLBACK_PROJECT, FormatConfig, Project, ToolsConfig},
    store::{ConfigStore, SharedConfig},
    validate::{Diagnostic, Severity, has_errors, validate},
};
