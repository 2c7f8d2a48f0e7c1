//! TavusClient - REST client for the avatar-conversation provider.
//!
//! One HTTP call per operation, no retries, no pagination. Every failure is
//! returned as an [`IntervueError`] for the caller to display.

use crate::prompts::{INTERVIEWER_PERSONA_NAME, INTERVIEWER_SYSTEM_INSTRUCTION};
use crate::response::{decode_json, ensure_success};
use async_trait::async_trait;
use intervue_core::config::ClientConfig;
use intervue_core::http::{HttpRequest, HttpResponse, HttpTransport};
use intervue_core::remote::{
    Conversation, CreateConversationRequest, CreatePersonaRequest, ListEnvelope, Persona, Replica,
};
use intervue_core::{IntervueError, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;

const PROVIDER: &str = "Tavus";
const DEFAULT_SESSION_NAME: &str = "Interview Session";
const DEFAULT_TEST_CONVERSATION_NAME: &str = "Test Interview Session";

/// Parameters for starting a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationOptions {
    pub replica_id: String,
    pub persona_id: String,
    pub conversation_name: Option<String>,
}

impl ConversationOptions {
    pub fn new(replica_id: impl Into<String>, persona_id: impl Into<String>) -> Self {
        Self {
            replica_id: replica_id.into(),
            persona_id: persona_id.into(),
            conversation_name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.conversation_name = Some(name.into());
        self
    }

    fn into_request(self, default_name: &str) -> CreateConversationRequest {
        CreateConversationRequest {
            replica_id: self.replica_id,
            persona_id: self.persona_id,
            conversation_name: Some(
                self.conversation_name
                    .unwrap_or_else(|| default_name.to_string()),
            ),
        }
    }
}

/// Source of the conversation listing.
#[async_trait]
pub trait ConversationCatalog: Send + Sync {
    async fn list_conversations(&self) -> Result<Vec<Conversation>>;
}

/// Client for replicas, personas and conversations.
#[derive(Clone)]
pub struct TavusClient {
    transport: Arc<dyn HttpTransport>,
    config: ClientConfig,
    default_replica_id: Option<String>,
}

impl TavusClient {
    /// Creates a client. A missing credential is allowed; every call then
    /// fails with [`IntervueError::MissingCredential`] before touching the
    /// network.
    pub fn new(transport: Arc<dyn HttpTransport>, config: ClientConfig) -> Self {
        if !config.has_credential() {
            tracing::warn!("TAVUS_API_KEY not found. Avatar provider calls will fail until it is set.");
        }
        Self {
            transport,
            config,
            default_replica_id: None,
        }
    }

    pub fn with_default_replica_id(mut self, replica_id: Option<String>) -> Self {
        self.default_replica_id = replica_id.filter(|id| !id.trim().is_empty());
        self
    }

    pub fn default_replica_id(&self) -> Option<&str> {
        self.default_replica_id.as_deref()
    }

    pub async fn list_replicas(&self) -> Result<Vec<Replica>> {
        self.get_list("/replicas").await
    }

    pub async fn list_personas(&self) -> Result<Vec<Persona>> {
        self.get_list("/personas").await
    }

    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.get_list("/conversations").await
    }

    pub async fn create_persona(&self, request: &CreatePersonaRequest) -> Result<Persona> {
        tracing::info!(persona_name = ?request.persona_name, "Creating Tavus persona");
        let body = serde_json::to_value(request)?;
        self.post("/personas", body).await
    }

    /// Creates the sales-engineering hiring-manager persona.
    pub async fn create_sales_engineer_persona(&self) -> Result<Persona> {
        let request = CreatePersonaRequest {
            pipeline_mode: "full".to_string(),
            system_prompt: INTERVIEWER_SYSTEM_INSTRUCTION.to_string(),
            persona_name: Some(INTERVIEWER_PERSONA_NAME.to_string()),
            default_replica_id: None,
        };
        self.create_persona(&request).await
    }

    /// Creates a conversation and returns the provider's full record.
    pub async fn create_conversation(&self, options: ConversationOptions) -> Result<Conversation> {
        let request = options.into_request(DEFAULT_TEST_CONVERSATION_NAME);
        self.post_conversation(&request).await
    }

    /// Creates a conversation and returns only the joinable session URL.
    pub async fn create_interview_session(&self, options: ConversationOptions) -> Result<String> {
        let request = options.into_request(DEFAULT_SESSION_NAME);
        let conversation = self.post_conversation(&request).await?;

        conversation
            .conversation_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| IntervueError::decode("Tavus API did not return a conversation_url"))
    }

    /// The configured default replica, else the first replica the provider
    /// lists.
    pub async fn resolve_replica_id(&self) -> Result<String> {
        if let Some(id) = &self.default_replica_id {
            return Ok(id.clone());
        }

        self.list_replicas()
            .await?
            .into_iter()
            .next()
            .map(|replica| replica.replica_id)
            .ok_or_else(|| {
                IntervueError::config(
                    "No replica ID available. Set tavus.default_replica_id or TAVUS_DEFAULT_REPLICA_ID",
                )
            })
    }

    async fn post_conversation(&self, request: &CreateConversationRequest) -> Result<Conversation> {
        tracing::info!(
            replica_id = %request.replica_id,
            persona_id = %request.persona_id,
            "Creating Tavus conversation"
        );
        let body = serde_json::to_value(request)?;
        self.post("/conversations", body).await
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let request = self.authorized(HttpRequest::get(self.url(path)))?;
        let response = self.execute(path, request).await?;
        let envelope: ListEnvelope<T> = decode_json(PROVIDER, &response)?;
        let items = envelope.into_items();
        tracing::debug!(path, count = items.len(), "Tavus list fetched");
        Ok(items)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> Result<T> {
        let request = self.authorized(HttpRequest::post(self.url(path), body))?;
        let response = self.execute(path, request).await?;
        decode_json(PROVIDER, &response)
    }

    async fn execute(&self, path: &str, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method.as_str();
        let result = match self.transport.send(request).await {
            Ok(response) => ensure_success(PROVIDER, response),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            tracing::error!("Tavus {} {} failed: {}", method, path, err);
        }
        result
    }

    fn authorized(&self, request: HttpRequest) -> Result<HttpRequest> {
        let api_key = self
            .config
            .credential
            .as_deref()
            .ok_or(IntervueError::MissingCredential {
                provider: PROVIDER,
                env_var: "TAVUS_API_KEY",
            })?;
        Ok(request.with_header("x-api-key", api_key))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

#[async_trait]
impl ConversationCatalog for TavusClient {
    async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        TavusClient::list_conversations(self).await
    }
}
