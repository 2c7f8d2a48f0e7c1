//! Secret service implementation.
//!
//! Reads provider credentials from `secret.json`, falling back to
//! environment variables for any provider the file leaves out.

use crate::paths::IntervuePaths;
use intervue_core::config::{GeminiSecret, SecretConfig, TavusSecret};
use intervue_core::secret::SecretService;
use intervue_core::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const TAVUS_API_KEY_ENV: &str = "TAVUS_API_KEY";
pub const TAVUS_DEFAULT_REPLICA_ENV: &str = "TAVUS_DEFAULT_REPLICA_ID";

/// Where environment fallbacks are read from.
#[derive(Debug, Clone)]
enum Environment {
    Process,
    Fixed(HashMap<String, String>),
}

impl Environment {
    fn var(&self, name: &str) -> Option<String> {
        let value = match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Service for loading secret configuration.
///
/// The merged result is cached after the first successful load.
///
/// # Example
///
/// ```ignore
/// use intervue_infrastructure::SecretServiceImpl;
/// use intervue_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new(None)?;
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    secret_path: PathBuf,
    environment: Environment,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates a service reading `secret.json` under `base_path`, or under the
    /// platform config directory when `None`.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let secret_path = IntervuePaths::new(base_path).secret_file()?;
        Ok(Self {
            secret_path,
            environment: Environment::Process,
            secrets: Arc::new(RwLock::new(None)),
        })
    }

    /// Replaces the process environment with a fixed set of variables.
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Environment::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn secret_path(&self) -> &Path {
        &self.secret_path
    }

    async fn read_file(&self) -> Result<SecretConfig> {
        match tokio::fs::read_to_string(&self.secret_path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No secret file at {}", self.secret_path.display());
                Ok(SecretConfig::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fills providers the file leaves out (or leaves blank) from the environment.
    fn apply_environment(&self, mut config: SecretConfig) -> SecretConfig {
        let gemini_blank = config
            .gemini
            .as_ref()
            .is_none_or(|gemini| gemini.api_key.trim().is_empty());
        if gemini_blank {
            if let Some(api_key) = self.environment.var(GEMINI_API_KEY_ENV) {
                let model_name = config.gemini.take().and_then(|gemini| gemini.model_name);
                config.gemini = Some(GeminiSecret { api_key, model_name });
            }
        }

        let tavus_blank = config
            .tavus
            .as_ref()
            .is_none_or(|tavus| tavus.api_key.trim().is_empty());
        if tavus_blank {
            if let Some(api_key) = self.environment.var(TAVUS_API_KEY_ENV) {
                let default_replica_id = config.tavus.take().and_then(|t| t.default_replica_id);
                config.tavus = Some(TavusSecret {
                    api_key,
                    default_replica_id,
                });
            }
        }

        if let Some(tavus) = config.tavus.as_mut() {
            if tavus.default_replica_id.is_none() {
                tavus.default_replica_id = self.environment.var(TAVUS_DEFAULT_REPLICA_ENV);
            }
        }

        config
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.secrets.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = self.apply_environment(self.read_file().await?);
        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    async fn secret_file_exists(&self) -> bool {
        tokio::fs::try_exists(&self.secret_path)
            .await
            .unwrap_or(false)
    }
}
