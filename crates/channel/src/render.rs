//! Message bodies sent back to the channel.
//!
//! Pure rendering; the pipeline decides which message (placeholder edit
//! or direct reply) each body targets.

/// Terminal result of processing one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The check passed; `warnings` carries the tool's warning output,
    /// possibly empty.
    Success { warnings: String },
    Failure { reason: String },
}

/// Initial placeholder posted before the check runs.
pub const WORKING: &str = "Working, please wait...";

/// Mention token for a user id.
#[must_use]
pub fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}

/// The formatted code block carried by every placeholder edit.
#[must_use]
pub fn submission_header(author_id: &str, code: &str) -> String {
    format!("<@{author_id}>,```cpp\n{code}\n```\n")
}

/// Placeholder content while the check is still running.
#[must_use]
pub fn building(header: &str) -> String {
    format!("{header}Building...")
}

/// Final placeholder content for an [`Outcome`].
#[must_use]
pub fn outcome_body(header: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success { warnings } => {
            let warnings = if warnings.trim().is_empty() {
                "None!"
            } else {
                warnings.as_str()
            };
            format!("{header}:white_check_mark:  Build successful! Warnings:\n{warnings}")
        },
        Outcome::Failure { reason } => {
            format!("{header}:no_entry:  Build failed:\n{reason}")
        },
    }
}

/// Direct reply used when formatting itself failed. No placeholder exists
/// at that point, so the original text is echoed back.
#[must_use]
pub fn format_failure_reply(author_id: &str, original: &str, reason: &str) -> String {
    format!(
        "<@{author_id}>, Your message: \n\"{original}\"\n:warning:  Could not be formatted!\nReason: {reason}"
    )
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_wraps_code_in_cpp_block() {
        assert_eq!(
            submission_header("7", "int x = 1;"),
            "<@7>,```cpp\nint x = 1;\n```\n"
        );
    }

    #[test]
    fn success_with_empty_warnings_says_none() {
        let body = outcome_body(
            "h\n",
            &Outcome::Success {
                warnings: String::new(),
            },
        );
        assert_eq!(body, "h\n:white_check_mark:  Build successful! Warnings:\nNone!");
    }

    #[test]
    fn success_carries_warnings_verbatim() {
        let body = outcome_body(
            "h\n",
            &Outcome::Success {
                warnings: "warning: unused variable".into(),
            },
        );
        assert!(body.ends_with("Warnings:\nwarning: unused variable"));
    }

    #[test]
    fn failure_carries_reason() {
        let body = outcome_body(
            "h\n",
            &Outcome::Failure {
                reason: "undefined reference to `main'".into(),
            },
        );
        assert_eq!(body, "h\n:no_entry:  Build failed:\nundefined reference to `main'");
    }

    #[test]
    fn format_failure_echoes_original_text() {
        let reply = format_failure_reply("7", "int x", "unbalanced braces");
        assert_eq!(
            reply,
            "<@7>, Your message: \n\"int x\"\n:warning:  Could not be formatted!\nReason: unbalanced braces"
        );
    }
}
