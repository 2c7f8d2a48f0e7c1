//! Chat-turn relay for the text interview.
//!
//! Every call returns text. A missing credential or a failing backend turns
//! into a [`ChatReply::Degraded`] placeholder; callers never see an error.

use crate::gemini_api_agent::GeminiApiAgent;
use crate::prompts::{DEFAULT_OPENING_UTTERANCE, INTERVIEWER_SYSTEM_INSTRUCTION};
use intervue_core::chat::{ChatAgent, ChatReply, ChatRequest, ChatTurn};
use intervue_core::config::ClientConfig;
use intervue_core::http::HttpTransport;
use std::sync::Arc;

pub const START_DISABLED_REPLY: &str = "Welcome! I'm ready to begin the interview. Please set your GEMINI_API_KEY in secret.json or the environment to enable AI features.";
pub const START_FAILED_REPLY: &str =
    "I'm having trouble connecting to the evaluation server. Please check your connection.";
pub const START_EMPTY_REPLY: &str = "Let's begin. Tell me about yourself.";

pub const SEND_DISABLED_REPLY: &str =
    "AI features are disabled. Please set your GEMINI_API_KEY in secret.json or the environment.";
pub const SEND_FAILED_REPLY: &str = "Apologies, I missed that last part. Could you repeat?";
pub const SEND_EMPTY_REPLY: &str = "Could you clarify that?";

/// Relays interview turns to a chat backend.
#[derive(Clone)]
pub struct InterviewService {
    agent: Option<Arc<dyn ChatAgent>>,
    system_instruction: String,
}

impl InterviewService {
    /// Creates a relay around an optional backend. `None` means the
    /// credential was absent; every call will degrade.
    pub fn new(agent: Option<Arc<dyn ChatAgent>>) -> Self {
        if agent.is_none() {
            tracing::warn!("GEMINI_API_KEY not found. AI interview replies will be placeholders.");
        }
        Self {
            agent,
            system_instruction: INTERVIEWER_SYSTEM_INSTRUCTION.to_string(),
        }
    }

    /// Builds the relay on top of [`GeminiApiAgent`]. The credential is
    /// checked here, once.
    pub fn from_config(
        transport: Arc<dyn HttpTransport>,
        config: &ClientConfig,
        model: impl Into<String>,
    ) -> Self {
        let agent = GeminiApiAgent::from_config(transport, config)
            .map(|agent| Arc::new(agent.with_model(model)) as Arc<dyn ChatAgent>);
        Self::new(agent)
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.agent.is_some()
    }

    /// Opens the interview. No prior history is sent.
    pub async fn start_interview(&self, opening_utterance: Option<&str>) -> ChatReply {
        let Some(agent) = &self.agent else {
            return ChatReply::Degraded(START_DISABLED_REPLY.to_string());
        };

        let request = ChatRequest::new(opening_utterance.unwrap_or(DEFAULT_OPENING_UTTERANCE))
            .with_system_instruction(self.system_instruction.clone());

        match agent.complete(request).await {
            Ok(Some(text)) => ChatReply::Ok(text),
            Ok(None) => ChatReply::Ok(START_EMPTY_REPLY.to_string()),
            Err(err) => {
                tracing::error!("Interview start failed: {}", err);
                ChatReply::Degraded(START_FAILED_REPLY.to_string())
            }
        }
    }

    /// Sends the next candidate utterance with the full prior history.
    pub async fn send_message(&self, history: &[ChatTurn], message: &str) -> ChatReply {
        let Some(agent) = &self.agent else {
            return ChatReply::Degraded(SEND_DISABLED_REPLY.to_string());
        };

        let request = ChatRequest::new(message)
            .with_system_instruction(self.system_instruction.clone())
            .with_history(history.to_vec());

        match agent.complete(request).await {
            Ok(Some(text)) => ChatReply::Ok(text),
            Ok(None) => ChatReply::Ok(SEND_EMPTY_REPLY.to_string()),
            Err(err) => {
                tracing::error!("Interview chat turn failed: {}", err);
                ChatReply::Degraded(SEND_FAILED_REPLY.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubTransport;
    use async_trait::async_trait;
    use intervue_core::message::MessageRole;
    use intervue_core::Result;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records requests and answers with a fixed outcome.
    struct ScriptedAgent {
        outcome: Result<Option<String>>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedAgent {
        fn new(outcome: Result<Option<String>>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatAgent for ScriptedAgent {
        async fn complete(&self, request: ChatRequest) -> Result<Option<String>> {
            self.seen.lock().unwrap().push(request);
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_missing_credential_degrades_both_calls() {
        let service = InterviewService::new(None);
        assert!(!service.is_enabled());

        let start = service.start_interview(None).await;
        assert_eq!(start, ChatReply::Degraded(START_DISABLED_REPLY.to_string()));

        let send = service.send_message(&[], "hello").await;
        assert_eq!(send, ChatReply::Degraded(SEND_DISABLED_REPLY.to_string()));
    }

    #[tokio::test]
    async fn test_network_failure_returns_fallback_text() {
        let stub = StubTransport::new();
        stub.push_failure("connection refused");
        stub.push_failure("connection refused");
        let config = ClientConfig::new(Some("g-key".to_string()), "https://gemini.test");
        let service = InterviewService::from_config(stub.clone(), &config, "gemini-2.5-flash");

        let start = service.start_interview(None).await;
        assert!(start.is_degraded());
        assert_eq!(start.text(), START_FAILED_REPLY);

        let send = service.send_message(&[], "My answer").await;
        assert_eq!(send.text(), SEND_FAILED_REPLY);
        assert_eq!(stub.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_http_error_is_absorbed() {
        let stub = StubTransport::new();
        stub.push_json(500, json!({"error": {"message": "boom"}}));
        let config = ClientConfig::new(Some("g-key".to_string()), "https://gemini.test");
        let service = InterviewService::from_config(stub, &config, "gemini-2.5-flash");

        let reply = service.send_message(&[], "answer").await;
        assert_eq!(reply, ChatReply::Degraded(SEND_FAILED_REPLY.to_string()));
    }

    #[tokio::test]
    async fn test_start_uses_default_opening_without_history() {
        let agent = ScriptedAgent::new(Ok(Some("Tell me about your background.".into())));
        let service = InterviewService::new(Some(agent.clone() as Arc<dyn ChatAgent>));

        let reply = service.start_interview(None).await;
        assert_eq!(reply, ChatReply::Ok("Tell me about your background.".into()));

        let seen = agent.seen.lock().unwrap();
        assert_eq!(seen[0].message, DEFAULT_OPENING_UTTERANCE);
        assert!(seen[0].history.is_empty());
        assert_eq!(
            seen[0].system_instruction.as_deref(),
            Some(INTERVIEWER_SYSTEM_INSTRUCTION)
        );
    }

    #[tokio::test]
    async fn test_send_forwards_caller_history() {
        let agent = ScriptedAgent::new(Ok(Some("Good. Next question.".into())));
        let service = InterviewService::new(Some(agent.clone() as Arc<dyn ChatAgent>));
        let history = vec![
            ChatTurn::new(MessageRole::Assistant, "Introduce yourself."),
            ChatTurn::new(MessageRole::User, "I'm Sam."),
        ];

        service.send_message(&history, "I like APIs.").await;
        service.send_message(&history, "Again.").await;

        let seen = agent.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].history, history);
        assert_eq!(seen[1].history, history);
        assert_eq!(seen[1].message, "Again.");
    }

    #[tokio::test]
    async fn test_empty_completion_uses_placeholder() {
        let service = InterviewService::new(Some(ScriptedAgent::new(Ok(None)) as Arc<dyn ChatAgent>));
        assert_eq!(
            service.start_interview(Some("Hi")).await,
            ChatReply::Ok(START_EMPTY_REPLY.to_string())
        );
        assert_eq!(
            service.send_message(&[], "Hi").await,
            ChatReply::Ok(SEND_EMPTY_REPLY.to_string())
        );
    }
}
