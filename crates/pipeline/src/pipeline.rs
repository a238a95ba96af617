use std::sync::Arc;

use tracing::{debug, warn};

use {
    codebot_channel::{AttachmentKind, ChatClient, InboundMessage, Outcome, render, select},
    codebot_config::{Project, SharedConfig},
};

use crate::{check::SyntaxChecker, format::Formatter, locks::ProjectLocks, stage::FileStager};

/// Runs one submission through format → acknowledge → stage → check →
/// report → cleanup.
///
/// Every stage failure becomes a channel message; nothing propagates to
/// the event loop.
pub struct SubmissionPipeline {
    config: SharedConfig,
    formatter: Arc<dyn Formatter>,
    checker: Arc<dyn SyntaxChecker>,
    stager: Arc<dyn FileStager>,
    client: Arc<dyn ChatClient>,
    locks: ProjectLocks,
}

impl SubmissionPipeline {
    pub fn new(
        config: SharedConfig,
        formatter: Arc<dyn Formatter>,
        checker: Arc<dyn SyntaxChecker>,
        stager: Arc<dyn FileStager>,
        client: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            config,
            formatter,
            checker,
            stager,
            client,
            locks: ProjectLocks::default(),
        }
    }

    /// Process one eligible submission to completion.
    pub async fn handle(&self, message: &InboundMessage) {
        let formatted = match self.formatter.format(&message.content).await {
            Ok(code) => code,
            Err(e) => {
                debug!(channel_id = %message.channel_id, error = %e, "format failed");
                let reply = render::format_failure_reply(
                    &message.author_id,
                    &message.content,
                    &e.to_string(),
                );
                if let Err(e) = self.client.send(&message.channel_id, &reply, &[]).await {
                    warn!(channel_id = %message.channel_id, error = %e, "failed to report format failure");
                }
                // No placeholder was posted and the original stays.
                return;
            },
        };

        let placeholder = match self
            .client
            .send(&message.channel_id, render::WORKING, &message.attachments)
            .await
        {
            Ok(handle) => handle,
            Err(e) => {
                warn!(channel_id = %message.channel_id, error = %e, "failed to post placeholder");
                return;
            },
        };

        let header = render::submission_header(&message.author_id, &formatted);
        if let Err(e) = self
            .client
            .edit(&placeholder, &render::building(&header))
            .await
        {
            warn!(channel_id = %message.channel_id, error = %e, "failed to edit placeholder");
        }

        let outcome = self.stage_and_check(message, &formatted).await;

        if let Err(e) = self
            .client
            .edit(&placeholder, &render::outcome_body(&header, &outcome))
            .await
        {
            warn!(channel_id = %message.channel_id, error = %e, "failed to report outcome");
        }

        // The placeholder now carries the content; drop the original to
        // avoid duplicates in the channel. Best-effort.
        if let Err(e) = self.client.delete(&message.channel_id, &message.id).await {
            warn!(
                channel_id = %message.channel_id,
                message_id = %message.id,
                error = %e,
                "failed to delete original message"
            );
        }
    }

    async fn stage_and_check(&self, message: &InboundMessage, formatted: &str) -> Outcome {
        let project = {
            let guard = self.config.read().unwrap_or_else(|e| e.into_inner());
            match codebot_projects::resolve(guard.config(), &message.channel_id) {
                Ok(project) => project.clone(),
                Err(e) => {
                    warn!(channel_id = %message.channel_id, error = %e, "project resolution failed");
                    return Outcome::Failure {
                        reason: e.to_string(),
                    };
                },
            }
        };
        debug!(
            channel_id = %message.channel_id,
            project = %project.name,
            "submission routed"
        );

        let lock = self.locks.lock_for(&project.name);
        let _serialized = lock.lock().await;

        let result = match select(&message.attachments) {
            None => self.checker.check_text(formatted).await,
            Some((attachment, AttachmentKind::SourceFile)) => {
                self.check_file(&attachment.url, &project).await
            },
            Some((_, AttachmentKind::Archive)) => {
                return Outcome::Failure {
                    reason: "Archives are not yet supported".into(),
                };
            },
            Some((_, AttachmentKind::Unsupported)) => {
                return Outcome::Failure {
                    reason: "File type not supported".into(),
                };
            },
        };

        match result {
            Ok(warnings) => Outcome::Success { warnings },
            Err(e) => Outcome::Failure {
                reason: e.to_string(),
            },
        }
    }

    async fn check_file(&self, url: &str, project: &Project) -> anyhow::Result<String> {
        self.stager.clear_directory(&project.upload).await?;
        self.stager.download_file(url, &project.upload).await?;
        self.checker.check_project(&project.root).await
    }
}
