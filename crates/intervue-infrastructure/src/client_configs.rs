//! Merges secrets and settings into per-client configuration.

use crate::config_storage::ConfigStorage;
use crate::secret_service::SecretServiceImpl;
use intervue_core::config::{AppSettings, ClientConfig, SecretConfig};
use intervue_core::secret::SecretService;
use intervue_core::Result;
use std::path::Path;

/// Everything the clients need, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfigs {
    pub gemini: ClientConfig,
    pub gemini_model: String,
    pub tavus: ClientConfig,
    pub default_replica_id: Option<String>,
    pub conversation_detail_url: String,
}

impl ClientConfigs {
    /// A `model_name` in `secret.json` overrides `[gemini] model`.
    pub fn from_parts(secrets: &SecretConfig, settings: &AppSettings) -> Self {
        let gemini_key = secrets.gemini.as_ref().map(|gemini| gemini.api_key.clone());
        let gemini_model = secrets
            .gemini
            .as_ref()
            .and_then(|gemini| gemini.model_name.clone())
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| settings.gemini.model.clone());

        let tavus_key = secrets.tavus.as_ref().map(|tavus| tavus.api_key.clone());
        let default_replica_id = secrets
            .tavus
            .as_ref()
            .and_then(|tavus| tavus.default_replica_id.clone())
            .filter(|id| !id.trim().is_empty());

        Self {
            gemini: ClientConfig::new(gemini_key, settings.gemini.base_url.clone()),
            gemini_model,
            tavus: ClientConfig::new(tavus_key, settings.tavus.base_url.clone()),
            default_replica_id,
            conversation_detail_url: settings.conversation_detail.url.clone(),
        }
    }

    /// Loads `secret.json` and `config.toml` from `base_path` (or the
    /// platform config directory) and merges them.
    pub async fn load(base_path: Option<&Path>) -> Result<Self> {
        let secrets = SecretServiceImpl::new(base_path)?.load_secrets().await?;
        let settings = ConfigStorage::new(base_path)?.load().await?;
        let configs = Self::from_parts(&secrets, &settings);
        if !configs.gemini.has_credential() {
            tracing::warn!("Gemini API key not configured; interview replies will be placeholders");
        }
        if !configs.tavus.has_credential() {
            tracing::warn!("Tavus API key not configured; remote calls will fail");
        }
        Ok(configs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervue_core::config::{
        DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiSecret, TavusSecret,
    };

    #[test]
    fn test_empty_inputs_resolve_to_defaults_without_credentials() {
        let configs = ClientConfigs::from_parts(&SecretConfig::default(), &AppSettings::default());

        assert!(!configs.gemini.has_credential());
        assert!(!configs.tavus.has_credential());
        assert_eq!(configs.gemini.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(configs.gemini_model, DEFAULT_GEMINI_MODEL);
        assert!(configs.default_replica_id.is_none());
    }

    #[test]
    fn test_secret_model_overrides_settings() {
        let secrets = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: "g".to_string(),
                model_name: Some("gemini-2.5-pro".to_string()),
            }),
            tavus: Some(TavusSecret {
                api_key: "t".to_string(),
                default_replica_id: Some("r-1".to_string()),
            }),
        };

        let configs = ClientConfigs::from_parts(&secrets, &AppSettings::default());

        assert_eq!(configs.gemini_model, "gemini-2.5-pro");
        assert_eq!(configs.gemini.credential.as_deref(), Some("g"));
        assert_eq!(configs.tavus.credential.as_deref(), Some("t"));
        assert_eq!(configs.default_replica_id.as_deref(), Some("r-1"));
    }

    #[test]
    fn test_blank_secret_key_counts_as_missing() {
        let secrets = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: "  ".to_string(),
                model_name: None,
            }),
            tavus: None,
        };

        let configs = ClientConfigs::from_parts(&secrets, &AppSettings::default());

        assert!(!configs.gemini.has_credential());
    }
}
