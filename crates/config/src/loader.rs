use std::path::Path;

use crate::{
    error::{Error, Result},
    schema::CodebotConfig,
};

/// Parse a configuration document in the format implied by `path`'s
/// extension, after `${ENV_VAR}` substitution.
pub(crate) fn parse_config(raw: &str, path: &Path) -> Result<CodebotConfig> {
    let raw = substitute_env(raw);
    match extension(path) {
        "toml" => toml::from_str(&raw).map_err(|e| Error::parse(path, e)),
        "yaml" | "yml" => serde_yaml::from_str(&raw).map_err(|e| Error::parse(path, e)),
        "json" => serde_json::from_str(&raw).map_err(|e| Error::parse(path, e)),
        other => Err(Error::UnsupportedFormat {
            extension: other.into(),
        }),
    }
}

/// Serialize the configuration in the format implied by `path`'s extension.
pub(crate) fn serialize_config(config: &CodebotConfig, path: &Path) -> Result<String> {
    match extension(path) {
        "toml" => toml::to_string_pretty(config).map_err(Error::serialize),
        "yaml" | "yml" => serde_yaml::to_string(config).map_err(Error::serialize),
        "json" => serde_json::to_string_pretty(config).map_err(Error::serialize),
        other => Err(Error::UnsupportedFormat {
            extension: other.into(),
        }),
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("toml")
}

/// Replace `${ENV_VAR}` placeholders in config string values.
///
/// Unresolvable variables are left as-is.
fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        match tail.find('}') {
            Some(end) if end > 0 => {
                let name = &tail[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    // Leave unresolved placeholders untouched.
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &tail[end + 1..];
            },
            _ => {
                out.push_str("${");
                rest = tail;
            },
        }
    }
    out.push_str(rest);
    out
}
