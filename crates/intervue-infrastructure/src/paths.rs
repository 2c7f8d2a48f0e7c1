//! Path management for Intervue configuration files.
//!
//! ```text
//! ~/.config/intervue/
//! ├── config.toml     # Endpoints and model selection
//! └── secret.json     # API keys
//! ```

use intervue_core::config::{GeminiSecret, SecretConfig, TavusSecret};
use intervue_core::{IntervueError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "intervue";

/// Resolves configuration file locations.
///
/// With a base directory every file lives directly under it; otherwise the
/// platform config directory from `dirs` is used.
#[derive(Debug, Clone, Default)]
pub struct IntervuePaths {
    base_dir: Option<PathBuf>,
}

impl IntervuePaths {
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the Intervue configuration directory (e.g. `~/.config/intervue/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| IntervueError::config("Cannot find home directory"))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to `secret.json`. Keep it at mode 600.
    pub fn secret_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Ensures the secret file exists, writing an empty template if it does not.
    ///
    /// The template leaves `model_name` unset so `[gemini] model` in
    /// `config.toml` stays in effect.
    ///
    /// On Unix the new file is restricted to the owner (600). An existing
    /// file is never touched.
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let secret_path = self.secret_file()?;
        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: String::new(),
                model_name: None,
            }),
            tavus: Some(TavusSecret {
                api_key: String::new(),
                default_replica_id: None,
            }),
        };
        std::fs::write(&secret_path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&secret_path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!("Created secret template at {}", secret_path.display());
        Ok(secret_path)
    }
}
