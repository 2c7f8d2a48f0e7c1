//! Interview message types.
//!
//! The visible transcript of a live interview: an append-only sequence of
//! user and assistant messages, each stamped when captured.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the speaker of a message in an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The candidate.
    User,
    /// The AI interviewer.
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single captured message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewMessage {
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl InterviewMessage {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }
}

/// Append-only interview transcript.
///
/// Messages are never mutated, removed or reordered once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    messages: Vec<InterviewMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: InterviewMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[InterviewMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&InterviewMessage> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_preserves_append_order() {
        let mut transcript = Transcript::new();
        transcript.push(InterviewMessage::assistant("Tell me about yourself."));
        transcript.push(InterviewMessage::user("I build APIs."));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].role, MessageRole::Assistant);
        assert_eq!(transcript.last().map(|m| m.text.as_str()), Some("I build APIs."));
        assert!(transcript.messages()[0].timestamp <= transcript.messages()[1].timestamp);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
