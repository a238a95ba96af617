use tracing::debug;

use codebot_config::{CodebotConfig, FALLBACK_PROJECT, Project};

use crate::error::{Error, Result};

/// Find the project responsible for `channel_id`.
///
/// Returns the project whose channel list contains the id, falling back
/// to the `"empty"` project when no binding exists. The fallback project
/// is required; its absence is normally caught by startup validation.
pub fn resolve<'a>(config: &'a CodebotConfig, channel_id: &str) -> Result<&'a Project> {
    if let Some(project) = config
        .projects
        .iter()
        .find(|p| p.channels.iter().any(|c| c == channel_id))
    {
        return Ok(project);
    }
    config
        .projects
        .iter()
        .find(|p| p.name == FALLBACK_PROJECT)
        .ok_or(Error::NoFallbackProject)
}

/// Bind `channel_id` exclusively to the project named `project_name`.
///
/// The channel is first removed from every project, so a corrupted
/// double-binding cannot survive a rebind. Returns `None` when no project
/// has that name; the channel is then left unbound and routes to
/// `"empty"` via [`resolve`].
pub fn bind<'a>(
    config: &'a mut CodebotConfig,
    channel_id: &str,
    project_name: &str,
) -> Option<&'a Project> {
    for project in &mut config.projects {
        project.channels.retain(|c| c != channel_id);
    }
    let project = config
        .projects
        .iter_mut()
        .find(|p| p.name == project_name)?;
    project.channels.push(channel_id.to_string());
    debug!(channel_id, project = %project.name, "channel bound to project");
    Some(project)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, channels: &[&str]) -> Project {
        Project {
            name: name.into(),
            root: format!("/srv/{name}").into(),
            upload: format!("/srv/{name}/upload").into(),
            channels: channels.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    fn config(projects: Vec<Project>) -> CodebotConfig {
        CodebotConfig {
            projects,
            ..CodebotConfig::default()
        }
    }

    fn channels_of<'a>(config: &'a CodebotConfig, name: &str) -> &'a [String] {
        &config
            .projects
            .iter()
            .find(|p| p.name == name)
            .unwrap()
            .channels
    }

    #[test]
    fn resolve_returns_bound_project() {
        let config = config(vec![project("empty", &[]), project("course", &["42"])]);
        assert_eq!(resolve(&config, "42").unwrap().name, "course");
    }

    #[test]
    fn resolve_falls_back_to_empty() {
        let config = config(vec![project("empty", &[]), project("course", &["42"])]);
        assert_eq!(resolve(&config, "99").unwrap().name, "empty");
    }

    #[test]
    fn resolve_without_fallback_is_an_error() {
        let config = config(vec![project("course", &["42"])]);
        assert!(matches!(
            resolve(&config, "99").unwrap_err(),
            Error::NoFallbackProject
        ));
    }

    #[test]
    fn bind_moves_channel_between_projects() {
        let mut config = config(vec![
            project("empty", &[]),
            project("p", &["42"]),
            project("q", &[]),
        ]);
        let bound = bind(&mut config, "42", "q").unwrap();
        assert_eq!(bound.name, "q");
        assert_eq!(channels_of(&config, "q"), ["42"]);
        assert!(channels_of(&config, "p").is_empty());
    }

    #[test]
    fn bind_repairs_corrupted_double_binding() {
        let mut config = config(vec![
            project("empty", &["42"]),
            project("p", &["42"]),
            project("q", &[]),
        ]);
        bind(&mut config, "42", "q").unwrap();
        assert_eq!(channels_of(&config, "q"), ["42"]);
        assert!(channels_of(&config, "p").is_empty());
        assert!(channels_of(&config, "empty").is_empty());
    }

    #[test]
    fn bind_to_unknown_project_clears_prior_binding() {
        let mut config = config(vec![project("empty", &[]), project("p", &["42"])]);
        assert!(bind(&mut config, "42", "nope").is_none());
        assert!(channels_of(&config, "p").is_empty());
        assert_eq!(resolve(&config, "42").unwrap().name, "empty");
    }

    #[test]
    fn bind_is_idempotent_for_same_project() {
        let mut config = config(vec![project("empty", &[]), project("p", &["42"])]);
        bind(&mut config, "42", "p").unwrap();
        bind(&mut config, "42", "p").unwrap();
        assert_eq!(channels_of(&config, "p"), ["42"]);
    }
}
