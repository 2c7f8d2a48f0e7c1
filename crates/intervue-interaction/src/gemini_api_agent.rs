//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `models/{model}:generateContent` with the full chat context on every
//! request. There is no server-side chat session.

use async_trait::async_trait;
use intervue_core::chat::{ChatAgent, ChatRequest, ChatTurn};
use intervue_core::config::{ClientConfig, DEFAULT_GEMINI_MODEL};
use intervue_core::http::{HttpRequest, HttpTransport};
use intervue_core::message::MessageRole;
use intervue_core::{IntervueError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const PROVIDER: &str = "Gemini";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and the default model.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }

    /// Builds an agent from explicit configuration.
    ///
    /// Returns `None` when no credential is configured.
    pub fn from_config(transport: Arc<dyn HttpTransport>, config: &ClientConfig) -> Option<Self> {
        let api_key = config.credential.clone()?;
        Some(Self::new(transport, api_key, config.base_url.clone()))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        )
    }

    fn build_request(request: &ChatRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request.history.iter().map(Content::from_turn).collect();
        contents.push(Content::text("user", &request.message));

        let system_instruction = request
            .system_instruction
            .as_ref()
            .map(|text| Content::text("system", text));

        GenerateContentRequest {
            contents,
            system_instruction,
        }
    }
}

#[async_trait]
impl ChatAgent for GeminiApiAgent {
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>> {
        let body = serde_json::to_value(Self::build_request(&request))?;

        tracing::debug!(
            model = %self.model,
            history_len = request.history.len(),
            "Sending Gemini generateContent request"
        );

        let response = self
            .transport
            .send(HttpRequest::post(self.endpoint(), body))
            .await?;

        if !response.is_success() {
            return Err(map_http_error(
                response.status,
                &response.status_text,
                &response.body,
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&response.body)
            .map_err(|err| IntervueError::decode(format!("Failed to parse Gemini response: {err}")))?;

        Ok(extract_text_response(parsed))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    // Gemini calls the assistant side "model".
    fn from_turn(turn: &ChatTurn) -> Self {
        let role = match turn.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        };
        Self::text(role, &turn.text)
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
}

fn map_http_error(status: u16, status_text: &str, body: &str) -> IntervueError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let code = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if code.is_empty() {
                msg
            } else {
                format!("{code}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    IntervueError::api(PROVIDER, status, status_text, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubTransport;
    use intervue_core::http::HttpResponse;
    use serde_json::json;

    fn agent(stub: &Arc<StubTransport>) -> GeminiApiAgent {
        GeminiApiAgent::new(stub.clone(), "g-key", "https://gemini.test/v1beta/models")
    }

    #[tokio::test]
    async fn test_request_carries_history_and_system_instruction() {
        let stub = StubTransport::new();
        stub.push_json(200, json!({
            "candidates": [{"content": {"parts": [{"text": "Walk me through an API you debugged."}]}}]
        }));

        let request = ChatRequest::new("I'm a sales engineer at a CDN.")
            .with_system_instruction("Be an interviewer.")
            .with_history(vec![ChatTurn::new(MessageRole::Assistant, "Introduce yourself.")]);

        let reply = agent(&stub).complete(request).await.unwrap();
        assert_eq!(reply.as_deref(), Some("Walk me through an API you debugged."));

        let sent = stub.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].url,
            "https://gemini.test/v1beta/models/gemini-2.5-flash:generateContent?key=g-key"
        );
        let body = sent[0].body.clone().unwrap();
        assert_eq!(body["contents"][0]["role"], "model");
        assert_eq!(body["contents"][1]["role"], "user");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "I'm a sales engineer at a CDN.");
        assert_eq!(body["system_instruction"]["parts"][0]["text"], "Be an interviewer.");
    }

    #[tokio::test]
    async fn test_empty_candidates_yield_none() {
        let stub = StubTransport::new();
        stub.push_json(200, json!({"candidates": []}));

        let reply = agent(&stub).complete(ChatRequest::new("hi")).await.unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_http_error_uses_provider_message() {
        let stub = StubTransport::new();
        stub.push(HttpResponse::new(
            403,
            "Forbidden",
            r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#,
        ));

        let err = agent(&stub).complete(ChatRequest::new("hi")).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("PERMISSION_DENIED: API key not valid"));
    }

    #[test]
    fn test_from_config_requires_credential() {
        let stub = StubTransport::new();
        let config = ClientConfig::new(None, "https://gemini.test");
        assert!(GeminiApiAgent::from_config(stub, &config).is_none());
    }
}
