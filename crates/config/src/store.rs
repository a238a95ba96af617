use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    loader,
    schema::CodebotConfig,
};

/// Owns the loaded configuration and the file it came from.
///
/// Mutations are applied in-memory first; callers invoke [`save`] before
/// acknowledging a command. A failed save is reported but does not roll
/// back the in-memory state.
///
/// [`save`]: ConfigStore::save
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: CodebotConfig,
}

/// Process-wide handle to the configuration. Mutating commands complete
/// their read-modify-write-save sequence inside one write lock.
pub type SharedConfig = Arc<RwLock<ConfigStore>>;

impl ConfigStore {
    /// Load the configuration from `path`, applying schema defaults for
    /// any missing field. Unreadable or corrupt storage is an error the
    /// caller treats as fatal at startup.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = loader::parse_config(&raw, path)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Wrap an already-built configuration, to be saved at `path`.
    pub fn new(path: PathBuf, config: CodebotConfig) -> Self {
        Self { path, config }
    }

    /// Persist the in-memory configuration to its file, in the file's own
    /// format. Creates parent directories if needed.
    pub fn save(&self) -> Result<()> {
        let data = loader::serialize_config(&self.config, &self.path)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.path, data).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn config(&self) -> &CodebotConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CodebotConfig {
        &mut self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
