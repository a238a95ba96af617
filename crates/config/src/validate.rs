//! Startup validation of the loaded configuration.
//!
//! Errors abort startup (a broken routing invariant is cheaper to refuse
//! at boot than to discover per submission); warnings and infos are
//! logged and the bot runs anyway.

use std::collections::HashSet;

use secrecy::ExposeSecret;

use crate::schema::{CodebotConfig, FALLBACK_PROJECT};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "credentials", "projects", "channels", "admins", "file-ref"
    pub category: &'static str,
    /// Dotted path, e.g. "projects.course.channels"
    pub path: String,
    pub message: String,
}

/// Returns `true` if any diagnostic is an error.
#[must_use]
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

/// Validate the loaded configuration.
#[must_use]
pub fn validate(config: &CodebotConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if config.token.expose_secret().is_empty() {
        diagnostics.push(Diagnostic {
            severity: Severity::Error,
            category: "credentials",
            path: "token".into(),
            message: "token is empty; the bot cannot sign in".into(),
        });
    }

    if !config.projects.iter().any(|p| p.name == FALLBACK_PROJECT) {
        diagnostics.push(Diagnostic {
            severity: Severity::Error,
            category: "projects",
            path: "projects".into(),
            message: format!(
                "no project named \"{FALLBACK_PROJECT}\"; channels without a binding cannot be routed"
            ),
        });
    }

    let mut names = HashSet::new();
    for project in &config.projects {
        if !names.insert(project.name.as_str()) {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                category: "projects",
                path: format!("projects.{}", project.name),
                message: "duplicate project name".into(),
            });
        }
    }

    // Channel-binding exclusivity across projects.
    let mut bound = HashSet::new();
    for project in &config.projects {
        for channel in &project.channels {
            if !bound.insert(channel.as_str()) {
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    category: "projects",
                    path: format!("projects.{}.channels", project.name),
                    message: format!("channel {channel} is bound to more than one project"),
                });
            }
        }
    }

    let mut enabled = HashSet::new();
    for channel in &config.channels {
        if !enabled.insert(channel.as_str()) {
            diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                category: "channels",
                path: "channels".into(),
                message: format!("channel {channel} is listed more than once"),
            });
        }
    }

    for project in &config.projects {
        for (field, path) in [("root", &project.root), ("upload", &project.upload)] {
            if !path.exists() {
                diagnostics.push(Diagnostic {
                    severity: Severity::Warning,
                    category: "file-ref",
                    path: format!("projects.{}.{field}", project.name),
                    message: format!("directory not found: {}", path.display()),
                });
            }
        }
    }

    if config.admins.is_empty() {
        diagnostics.push(Diagnostic {
            severity: Severity::Info,
            category: "admins",
            path: "admins".into(),
            message: "no admins configured; admin commands cannot be used".into(),
        });
    }

    diagnostics
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, crate::schema::Project, secrecy::Secret};

    fn base_config() -> CodebotConfig {
        CodebotConfig {
            token: Secret::new("t".into()),
            admins: vec!["1".into()],
            projects: vec![Project {
                name: FALLBACK_PROJECT.into(),
                root: std::env::temp_dir(),
                upload: std::env::temp_dir(),
                channels: Vec::new(),
            }],
            ..CodebotConfig::default()
        }
    }

    #[test]
    fn valid_config_has_no_errors() {
        let diagnostics = validate(&base_config());
        assert!(!has_errors(&diagnostics), "unexpected: {diagnostics:?}");
    }

    #[test]
    fn missing_fallback_project_is_an_error() {
        let mut config = base_config();
        config.projects.clear();
        let diagnostics = validate(&config);
        assert!(has_errors(&diagnostics));
        assert!(
            diagnostics
                .iter()
                .any(|d| d.category == "projects" && d.message.contains(FALLBACK_PROJECT))
        );
    }

    #[test]
    fn empty_token_is_an_error() {
        let mut config = base_config();
        config.token = Secret::new(String::new());
        let diagnostics = validate(&config);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.severity == Severity::Error && d.category == "credentials")
        );
    }

    #[test]
    fn double_bound_channel_is_an_error() {
        let mut config = base_config();
        config.projects.push(Project {
            name: "a".into(),
            root: std::env::temp_dir(),
            upload: std::env::temp_dir(),
            channels: vec!["42".into()],
        });
        config.projects.push(Project {
            name: "b".into(),
            root: std::env::temp_dir(),
            upload: std::env::temp_dir(),
            channels: vec!["42".into()],
        });
        let diagnostics = validate(&config);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.severity == Severity::Error && d.message.contains("more than one"))
        );
    }

    #[test]
    fn duplicate_enabled_channel_is_a_warning() {
        let mut config = base_config();
        config.channels = vec!["7".into(), "7".into()];
        let diagnostics = validate(&config);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.severity == Severity::Warning && d.category == "channels")
        );
        assert!(!has_errors(&diagnostics));
    }

    #[test]
    fn missing_project_directory_is_a_warning() {
        let mut config = base_config();
        config.projects[0].root = "/nonexistent/codebot-root".into();
        let diagnostics = validate(&config);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.category == "file-ref" && d.path.ends_with(".root"))
        );
    }

    #[test]
    fn no_admins_is_informational() {
        let mut config = base_config();
        config.admins.clear();
        let diagnostics = validate(&config);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.severity == Severity::Info && d.category == "admins")
        );
    }
}
