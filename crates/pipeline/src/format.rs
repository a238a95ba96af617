use std::{process::Stdio, time::Duration};

use {
    anyhow::{Context as _, Result, bail},
    async_trait::async_trait,
    codebot_config::FormatConfig,
    tokio::{io::AsyncWriteExt, process::Command},
    tracing::{debug, warn},
};

/// Code formatter boundary. A failure here aborts the pipeline before
/// any placeholder is posted.
#[async_trait]
pub trait Formatter: Send + Sync {
    /// Format `text`, returning the formatted code.
    async fn format(&self, text: &str) -> Result<String>;
}

/// Pipes the submission through an external formatter command
/// (`clang-format` by default) and returns its stdout.
pub struct ClangFormatter {
    config: FormatConfig,
}

impl ClangFormatter {
    #[must_use]
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Formatter for ClangFormatter {
    async fn format(&self, text: &str) -> Result<String> {
        debug!(command = %self.config.command, "formatting submission");
        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start {}", self.config.command))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A formatter that rejects the input may exit before the
            // write completes; its exit status is the signal that
            // matters, not the broken pipe.
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                debug!(error = %e, "formatter stdin closed early");
            }
            // Dropping stdin closes the pipe so the formatter sees EOF.
        }

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output.context("failed to run formatter")?,
            Err(_) => {
                warn!(command = %self.config.command, "formatter timed out");
                bail!("formatter timed out after {}s", timeout.as_secs());
            },
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{}", stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(command: &str, args: &[&str]) -> ClangFormatter {
        ClangFormatter::new(FormatConfig {
            command: command.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            timeout_secs: 5,
        })
    }

    #[tokio::test]
    async fn returns_formatter_stdout() {
        let formatted = formatter("cat", &[]).format("int x = 1;").await.unwrap();
        assert_eq!(formatted, "int x = 1;");
    }

    #[tokio::test]
    async fn nonzero_exit_carries_stderr() {
        let err = formatter("sh", &["-c", "echo bad input >&2; exit 1"])
            .format("x")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad input"));
    }

    #[tokio::test]
    async fn missing_command_is_reported() {
        let err = formatter("codebot-no-such-formatter", &[])
            .format("x")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[tokio::test]
    async fn slow_formatter_times_out() {
        let slow = ClangFormatter::new(FormatConfig {
            command: "sleep".into(),
            args: vec!["5".into()],
            timeout_secs: 1,
        });
        let err = slow.format("x").await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
