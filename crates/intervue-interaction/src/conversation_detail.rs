//! Client for the webhook-style conversation-detail aggregator.
//!
//! This endpoint is separate from the avatar provider: it is keyed only by
//! conversation id, needs no credential, and returns transcript and analysis
//! data the provider's own endpoints do not.

use crate::response::{decode_json, ensure_success};
use async_trait::async_trait;
use intervue_core::http::{HttpRequest, HttpTransport};
use intervue_core::remote::ConversationDetail;
use intervue_core::{IntervueError, Result};
use serde_json::{Value, json};
use std::sync::Arc;

const PROVIDER: &str = "Conversation details";

/// Anything that can produce a [`ConversationDetail`] for an id.
#[async_trait]
pub trait ConversationDetailSource: Send + Sync {
    async fn fetch_conversation_detail(&self, conversation_id: &str) -> Result<ConversationDetail>;
}

#[derive(Clone)]
pub struct ConversationDetailClient {
    transport: Arc<dyn HttpTransport>,
    url: String,
}

impl ConversationDetailClient {
    pub fn new(transport: Arc<dyn HttpTransport>, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ConversationDetailSource for ConversationDetailClient {
    async fn fetch_conversation_detail(&self, conversation_id: &str) -> Result<ConversationDetail> {
        tracing::info!(conversation_id, "Fetching conversation details");

        let request = HttpRequest::post(&self.url, json!({ "conversation_id": conversation_id }));
        let response = self.transport.send(request).await.inspect_err(|err| {
            tracing::error!("Error fetching conversation details: {}", err);
        })?;
        let response = ensure_success(PROVIDER, response)?;
        let payload: Value = decode_json(PROVIDER, &response)?;

        unwrap_detail(payload)
    }
}

/// The aggregator answers with either the record itself or a one-element
/// array around it.
fn unwrap_detail(payload: Value) -> Result<ConversationDetail> {
    let record = match payload {
        Value::Array(items) => {
            tracing::debug!(len = items.len(), "Conversation details arrived as array");
            items
                .into_iter()
                .next()
                .ok_or_else(|| IntervueError::not_found("No conversation details found"))?
        }
        other => other,
    };

    serde_json::from_value(record)
        .map_err(|err| IntervueError::decode(format!("Failed to parse {PROVIDER} response: {err}")))
}
