use std::{path::Path, process::Stdio, time::Duration};

use {
    anyhow::{Context as _, Result, bail},
    async_trait::async_trait,
    codebot_config::CheckConfig,
    tokio::process::Command,
    tracing::{debug, warn},
};

/// Syntax/build checker boundary. Success returns the tool's warnings
/// (possibly empty); failure carries the raw tool output.
#[async_trait]
pub trait SyntaxChecker: Send + Sync {
    /// Check a plain-text submission.
    async fn check_text(&self, code: &str) -> Result<String>;

    /// Build-check the staged project rooted at `root`.
    async fn check_project(&self, root: &Path) -> Result<String>;
}

/// Runs the configured compiler in syntax-only mode for text submissions
/// and the configured build command for file submissions.
pub struct CommandChecker {
    config: CheckConfig,
}

impl CommandChecker {
    #[must_use]
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SyntaxChecker for CommandChecker {
    async fn check_text(&self, code: &str) -> Result<String> {
        let dir = tempfile::tempdir().context("failed to create scratch directory")?;
        let source = dir.path().join("submission.cpp");
        tokio::fs::write(&source, code)
            .await
            .context("failed to stage submission")?;

        debug!(compiler = %self.config.compiler, "checking text submission");
        let mut command = Command::new(&self.config.compiler);
        command.args(&self.config.args).arg(&source);
        let output = run(command, self.config.timeout_secs, &self.config.compiler).await?;
        tool_outcome(&output)
    }

    async fn check_project(&self, root: &Path) -> Result<String> {
        debug!(
            root = %root.display(),
            command = %self.config.build_command,
            "checking project"
        );
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(&self.config.build_command)
            .current_dir(root);
        let output = run(command, self.config.timeout_secs, &self.config.build_command).await?;
        tool_outcome(&output)
    }
}

async fn run(mut command: Command, timeout_secs: u64, label: &str) -> Result<std::process::Output> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let child = command
        .spawn()
        .with_context(|| format!("failed to start {label}"))?;

    match tokio::time::timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(output) => output.with_context(|| format!("failed to run {label}")),
        Err(_) => {
            warn!(label, timeout_secs, "check timed out");
            bail!("{label} timed out after {timeout_secs}s")
        },
    }
}

/// Tool output beyond this many bytes is cut before rendering.
const MAX_TOOL_OUTPUT: usize = 16 * 1024;

/// Map exit status to warnings vs. build error. Checkers report both
/// warnings and errors on stderr; stdout is the fallback detail.
fn tool_outcome(output: &std::process::Output) -> Result<String> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if output.status.success() {
        return Ok(truncate_output(stderr.trim().to_string()));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let detail = if stderr.trim().is_empty() {
        stdout
    } else {
        stderr
    };
    bail!("{}", truncate_output(detail.trim().to_string()))
}

fn truncate_output(mut text: String) -> String {
    if text.len() > MAX_TOOL_OUTPUT {
        let mut end = MAX_TOOL_OUTPUT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        text.push_str("\n... [output truncated]");
    }
    text
}
