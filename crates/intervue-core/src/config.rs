//! Configuration types shared by every Intervue client.
//!
//! Secrets (API keys) and settings (models, endpoints) are kept apart:
//! secrets live in `secret.json`, settings in `config.toml`. Both are
//! resolved by the infrastructure layer and handed to clients as explicit
//! [`ClientConfig`] values.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TAVUS_BASE_URL: &str = "https://tavusapi.com/v2";
pub const DEFAULT_CONVERSATION_DETAIL_URL: &str =
    "https://buildhouse.app.n8n.cloud/webhook/get-conversation-data";

/// Root structure of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiSecret>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tavus: Option<TavusSecret>,
}

/// Gemini API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiSecret {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Tavus API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TavusSecret {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_replica_id: Option<String>,
}

/// Root structure of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub tavus: TavusSettings,
    #[serde(default)]
    pub conversation_detail: ConversationDetailSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiSettings {
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TavusSettings {
    #[serde(default = "default_tavus_base_url")]
    pub base_url: String,
}

impl Default for TavusSettings {
    fn default() -> Self {
        Self {
            base_url: default_tavus_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDetailSettings {
    #[serde(default = "default_conversation_detail_url")]
    pub url: String,
}

impl Default for ConversationDetailSettings {
    fn default() -> Self {
        Self {
            url: default_conversation_detail_url(),
        }
    }
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_gemini_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_tavus_base_url() -> String {
    DEFAULT_TAVUS_BASE_URL.to_string()
}

fn default_conversation_detail_url() -> String {
    DEFAULT_CONVERSATION_DETAIL_URL.to_string()
}

/// Explicit configuration handed to a client constructor.
///
/// A `None` credential is a valid, testable input: it selects the client's
/// degraded behavior instead of failing construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub credential: Option<String>,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(credential: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            // Blank keys behave like absent ones.
            credential: credential.filter(|key| !key.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}
