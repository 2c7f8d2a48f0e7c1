//! `config.toml` storage.
//!
//! Every key is optional; a missing file or section means defaults.
//! Saving goes through a temp file and an atomic rename.

use crate::paths::IntervuePaths;
use intervue_core::config::AppSettings;
use intervue_core::{IntervueError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Storage for `config.toml` under `base_path`, or the platform config
    /// directory when `None`.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        Ok(Self {
            path: IntervuePaths::new(base_path).config_file()?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<AppSettings> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let settings: AppSettings = toml::from_str(&content)?;
                tracing::debug!("Loaded settings from {}", self.path.display());
                Ok(settings)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {}, using defaults", self.path.display());
                Ok(AppSettings::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        let content = toml::to_string_pretty(settings)
            .map_err(|e| IntervueError::config(format!("TOML - {e}")))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.path.with_extension("toml.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}
