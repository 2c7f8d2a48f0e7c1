//! Decoding of the conversation-detail transcript field.
//!
//! The aggregator delivers transcripts either as a JSON-encoded string or as
//! an already-parsed array of `{role, content}` records. Both are decoded once
//! here into [`DecodedTranscript`]; anything that is not a sequence of records
//! is kept verbatim for display.

use crate::remote::pretty;
use serde::Serialize;
use serde_json::Value;

pub const EMPTY_DIALOGUE_NOTICE: &str = "No user/assistant messages found in transcript";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub role: String,
    pub content: Option<String>,
}

impl TranscriptEntry {
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    pub fn is_assistant(&self) -> bool {
        self.role == "assistant"
    }

    pub fn is_system(&self) -> bool {
        self.role == "system"
    }

    /// Speaker label as shown next to each line.
    pub fn speaker_label(&self) -> &str {
        if self.is_user() {
            "User"
        } else if self.is_assistant() {
            "Assistant"
        } else {
            &self.role
        }
    }

    pub fn content_or_placeholder(&self) -> &str {
        self.content
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or("No content")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DecodedTranscript {
    /// A sequence of role-bearing records, in delivery order.
    Structured(Vec<TranscriptEntry>),
    /// The original value, for verbatim display.
    Raw(String),
}

impl DecodedTranscript {
    /// Entries worth showing: everything except system prompts.
    pub fn dialogue(&self) -> Vec<&TranscriptEntry> {
        match self {
            DecodedTranscript::Structured(entries) => {
                entries.iter().filter(|entry| !entry.is_system()).collect()
            }
            DecodedTranscript::Raw(_) => Vec::new(),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            DecodedTranscript::Raw(text) => Some(text),
            DecodedTranscript::Structured(_) => None,
        }
    }
}

/// Decodes a transcript value. Never fails: undecodable input becomes
/// [`DecodedTranscript::Raw`] holding the original text. A sequence with no
/// role-bearing records is also kept raw.
pub fn decode_transcript(value: &Value) -> DecodedTranscript {
    match value {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => structured_or(entries_from(&items), || text.clone()),
            _ => DecodedTranscript::Raw(text.clone()),
        },
        Value::Array(items) => structured_or(entries_from(items), || pretty(value)),
        other => DecodedTranscript::Raw(pretty(other)),
    }
}

fn structured_or(entries: Vec<TranscriptEntry>, raw: impl FnOnce() -> String) -> DecodedTranscript {
    if entries.is_empty() {
        DecodedTranscript::Raw(raw())
    } else {
        DecodedTranscript::Structured(entries)
    }
}

// Null items and items without a string role are dropped.
fn entries_from(items: &[Value]) -> Vec<TranscriptEntry> {
    items
        .iter()
        .filter_map(|item| {
            let record = item.as_object()?;
            let role = record.get("role")?.as_str()?.to_string();
            if role.is_empty() {
                return None;
            }
            let content = match record.get("content") {
                None | Some(Value::Null) => None,
                Some(Value::String(text)) => Some(text.clone()),
                Some(other) => Some(other.to_string()),
            };
            Some(TranscriptEntry { role, content })
        })
        .collect()
}
