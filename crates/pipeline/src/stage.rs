use std::path::{Path, PathBuf};

use {
    anyhow::{Context as _, Result, bail},
    async_trait::async_trait,
    tracing::debug,
};

/// Staging-directory and download boundary.
#[async_trait]
pub trait FileStager: Send + Sync {
    /// Empty `dir`, creating it if missing, so no file from a prior
    /// submission survives.
    async fn clear_directory(&self, dir: &Path) -> Result<()>;

    /// Download `url` into `dir`, named after the last URL path segment.
    async fn download_file(&self, url: &str, dir: &Path) -> Result<PathBuf>;
}

/// reqwest-backed stager.
#[derive(Default)]
pub struct HttpFileStager {
    client: reqwest::Client,
}

impl HttpFileStager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStager for HttpFileStager {
    async fn clear_directory(&self, dir: &Path) -> Result<()> {
        match tokio::fs::remove_dir_all(dir).await {
            Ok(()) => {},
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => {
                return Err(e).with_context(|| format!("failed to clear {}", dir.display()));
            },
        }
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to recreate {}", dir.display()))?;
        debug!(dir = %dir.display(), "staging directory cleared");
        Ok(())
    }

    async fn download_file(&self, url: &str, dir: &Path) -> Result<PathBuf> {
        let name = file_name(url).context("attachment URL has no file name")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("failed to request attachment")?;
        if !response.status().is_success() {
            bail!("failed to download file: HTTP {}", response.status());
        }
        let data = response
            .bytes()
            .await
            .context("failed to read attachment body")?;

        let dest = dir.join(name);
        tokio::fs::write(&dest, &data)
            .await
            .with_context(|| format!("failed to write {}", dest.display()))?;
        debug!(url, dest = %dest.display(), bytes = data.len(), "attachment staged");
        Ok(dest)
    }
}

/// Last path segment of the URL, query string and fragment stripped.
fn file_name(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let without_scheme = path.split_once("://").map_or(path, |(_, rest)| rest);
    let (_, name) = without_scheme.rsplit_once('/')?;
    (!name.is_empty()).then(|| name.to_string())
}
