//! Config schema types (credentials, channels, projects, external tools).

use std::path::PathBuf;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Name of the project that receives channels with no explicit binding.
pub const FALLBACK_PROJECT: &str = "empty";

/// Root configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodebotConfig {
    /// Chat platform credential. Loaded once, never mutated at runtime.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,
    /// User ids allowed to run admin commands.
    pub admins: Vec<String>,
    /// Channels enabled for code submissions.
    pub channels: Vec<String>,
    /// Build configurations, each bound to zero or more channels.
    pub projects: Vec<Project>,
    /// Greetings; one is picked at random per enabled channel at startup.
    pub welcome: Vec<String>,
    pub tools: ToolsConfig,
}

impl Default for CodebotConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            admins: Vec::new(),
            channels: Vec::new(),
            projects: Vec::new(),
            welcome: default_welcome(),
            tools: ToolsConfig::default(),
        }
    }
}

impl std::fmt::Debug for CodebotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodebotConfig")
            .field("token", &"[REDACTED]")
            .field("admins", &self.admins)
            .field("channels", &self.channels)
            .field("projects", &self.projects)
            .field("welcome", &self.welcome)
            .field("tools", &self.tools)
            .finish()
    }
}

fn default_welcome() -> Vec<String> {
    vec!["CodeBot is online! Post your code and I'll format it and check it for errors.".into()]
}

/// A named build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique key, referenced by the `prset` command.
    pub name: String,
    /// Build root handed to the syntax checker's project mode.
    pub root: PathBuf,
    /// Staging directory cleared and repopulated per file submission.
    pub upload: PathBuf,
    /// Channels routed to this project. A channel id appears in at most
    /// one project's list system-wide.
    #[serde(default)]
    pub channels: Vec<String>,
}

/// External tool configuration (formatter, syntax checker).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub format: FormatConfig,
    pub check: CheckConfig,
}

/// Formatter invocation. The submission is piped to the command's stdin
/// and the formatted output read from stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            command: "clang-format".into(),
            args: Vec::new(),
            timeout_secs: 30,
        }
    }
}

/// Syntax checker invocation. Text submissions go through `compiler` with
/// `args`; file submissions run `build_command` in the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub compiler: String,
    pub args: Vec<String>,
    pub build_command: String,
    pub timeout_secs: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            compiler: "g++".into(),
            args: vec!["-fsyntax-only".into(), "-Wall".into(), "-Wextra".into()],
            build_command: "make".into(),
            timeout_secs: 60,
        }
    }
}

// ── Serde helper for Secret<String> ─────────────────────────────────────────

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_missing_fields() {
        let config: CodebotConfig = toml::from_str("token = \"t0k3n\"\n").unwrap();
        assert_eq!(config.token.expose_secret(), "t0k3n");
        assert!(config.admins.is_empty());
        assert!(config.channels.is_empty());
        assert!(config.projects.is_empty());
        assert!(!config.welcome.is_empty());
        assert_eq!(config.tools.format.command, "clang-format");
        assert_eq!(config.tools.check.compiler, "g++");
    }

    #[test]
    fn project_channels_default_to_empty() {
        let project: Project = toml::from_str(
            r#"
name = "course"
root = "/srv/course"
upload = "/srv/course/upload"
"#,
        )
        .unwrap();
        assert!(project.channels.is_empty());
    }

    #[test]
    fn debug_redacts_token() {
        let config: CodebotConfig = toml::from_str("token = \"hunter2\"\n").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn token_round_trips_through_serialization() {
        let config: CodebotConfig = toml::from_str("token = \"t0k3n\"\n").unwrap();
        let out = toml::to_string(&config).unwrap();
        let reloaded: CodebotConfig = toml::from_str(&out).unwrap();
        assert_eq!(reloaded.token.expose_secret(), "t0k3n");
    }
}
