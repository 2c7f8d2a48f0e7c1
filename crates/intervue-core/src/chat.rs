//! Chat agent seam and the relay's result type.

use crate::error::Result;
use crate::message::{InterviewMessage, MessageRole};
use async_trait::async_trait;

/// One prior turn handed to a chat agent as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub text: String,
}

impl ChatTurn {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

impl From<&InterviewMessage> for ChatTurn {
    fn from(message: &InterviewMessage) -> Self {
        Self::new(message.role, message.text.clone())
    }
}

/// A stateless completion request: the whole context travels with every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system_instruction: Option<String>,
    pub history: Vec<ChatTurn>,
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            history: Vec::new(),
            message: message.into(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }
}

/// A hosted chat completion backend.
///
/// Returns `Ok(None)` when the backend answered but produced no text.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>>;
}

/// Outcome of a chat-relay call. Never an error: failures become a
/// [`ChatReply::Degraded`] placeholder the UI can show as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Ok(String),
    Degraded(String),
}

impl ChatReply {
    pub fn text(&self) -> &str {
        match self {
            ChatReply::Ok(text) | ChatReply::Degraded(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ChatReply::Ok(text) | ChatReply::Degraded(text) => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ChatReply::Degraded(_))
    }
}
