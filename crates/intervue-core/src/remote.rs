//! Records returned by the avatar-conversation provider and the
//! conversation-detail aggregator.
//!
//! Shapes are dictated by the remote APIs. Every record keeps fields it does
//! not model in `extra` so nothing is lost on the way to display.

use crate::transcript::{DecodedTranscript, decode_transcript};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A provider-defined avatar identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replica {
    pub replica_id: String,
    #[serde(default)]
    pub replica_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named system-prompt configuration, optionally bound to a replica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub persona_id: String,
    #[serde(default)]
    pub persona_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perception_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_turn_detection: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A live avatar session pairing a persona and a replica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Conversation {
    /// Case-insensitive match on name or id. An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.conversation_id.to_lowercase().contains(&needle)
            || self
                .conversation_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
    }

    pub fn display_name(&self) -> &str {
        self.conversation_name
            .as_deref()
            .unwrap_or("Untitled Conversation")
    }
}

/// Enriched session data from the detail aggregator.
///
/// Display fields are kept as raw JSON values: the aggregator is not
/// versioned, and a field of an unexpected type must not fail the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub conversation_id: String,
    /// Either a JSON-encoded string or an already-structured sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    /// Seconds, as a number or a numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_id_used: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_joined_timestamp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_added_timestamp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutdown_reason: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutdown_timestamp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_added_timestamp: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConversationDetail {
    /// Decodes the transcript field, if any. Never fails.
    pub fn decoded_transcript(&self) -> Option<DecodedTranscript> {
        self.transcript
            .as_ref()
            .filter(|value| !value.is_null())
            .map(decode_transcript)
    }

    /// Transcript exactly as delivered, for saving to a file. Strings are
    /// kept verbatim, structured values are written as compact JSON.
    pub fn transcript_export(&self) -> Option<String> {
        match self.transcript.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn transcript_file_name(&self) -> String {
        format!("conversation-{}.txt", self.conversation_id)
    }

    /// Analysis as display text: strings verbatim, anything else pretty-printed.
    pub fn analysis_text(&self) -> Option<String> {
        match self.analysis.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(pretty(other)),
        }
    }

    pub fn participant_label(&self) -> Option<String> {
        display_text(self.participant_name.as_ref())
    }

    /// Shutdown reason with underscores turned into spaces.
    pub fn shutdown_reason_label(&self) -> Option<String> {
        display_text(self.shutdown_reason.as_ref()).map(|reason| reason.replace('_', " "))
    }

    /// Lifecycle timestamps that are present, labelled, in display order.
    pub fn timestamp_labels(&self) -> Vec<(&'static str, String)> {
        [
            ("Created", &self.created_at),
            ("Replica joined", &self.replica_joined_timestamp),
            ("Shutdown", &self.shutdown_timestamp),
            ("Transcript added", &self.transcript_added_timestamp),
            ("Analysis added", &self.analysis_added_timestamp),
        ]
        .into_iter()
        .filter_map(|(label, value)| display_text(value.as_ref()).map(|text| (label, text)))
        .collect()
    }

    /// Duration in seconds. Numeric strings are accepted; anything else is absent.
    pub fn duration_seconds(&self) -> Option<f64> {
        match self.duration.as_ref()? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.duration_seconds())
    }
}

/// Scalar values as plain text; strings unquoted, null and empty strings absent.
pub fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Formats seconds as `"{m}m {s}s"`; missing or zero durations are `"N/A"`.
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(total) = seconds.filter(|s| *s > 0.0) else {
        return "N/A".to_string();
    };
    let minutes = (total / 60.0).floor();
    let remaining = total - minutes * 60.0;
    if remaining.fract() == 0.0 {
        format!("{}m {}s", minutes as u64, remaining as u64)
    } else {
        format!("{}m {:.1}s", minutes as u64, remaining)
    }
}

pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// `{data: [...]}` list envelope. A missing or null `data` means no items.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Option<Vec<T>>,
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePersonaRequest {
    pub pipeline_mode: String,
    pub system_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_replica_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConversationRequest {
    pub replica_id: String,
    pub persona_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_envelope_defaults_to_empty() {
        let missing: ListEnvelope<Replica> = serde_json::from_value(json!({})).unwrap();
        assert!(missing.into_items().is_empty());

        let null: ListEnvelope<Replica> = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(null.into_items().is_empty());
    }

    // Item types need not implement Default.
    fn items_of<T: serde::de::DeserializeOwned>(body: Value) -> Vec<T> {
        serde_json::from_value::<ListEnvelope<T>>(body).unwrap().into_items()
    }

    #[test]
    fn test_list_envelope_is_generic_over_item_type() {
        let personas: Vec<Persona> = items_of(json!({"data": [{"persona_id": "p-1"}]}));
        assert_eq!(personas[0].persona_id, "p-1");

        let conversations: Vec<Conversation> = items_of(json!({}));
        assert!(conversations.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let replica: Replica = serde_json::from_value(json!({
            "replica_id": "r-1",
            "replica_name": "Anna",
            "thumbnail_video_url": "https://cdn.example/r-1.mp4"
        }))
        .unwrap();

        assert_eq!(
            replica.extra.get("thumbnail_video_url"),
            Some(&json!("https://cdn.example/r-1.mp4"))
        );
        let round = serde_json::to_value(&replica).unwrap();
        assert_eq!(round["thumbnail_video_url"], "https://cdn.example/r-1.mp4");
    }

    #[test]
    fn test_conversation_search() {
        let conversation: Conversation = serde_json::from_value(json!({
            "conversation_id": "c-ABC123",
            "conversation_name": "Sales Engineer Round 1"
        }))
        .unwrap();

        assert!(conversation.matches_search("sales"));
        assert!(conversation.matches_search("abc1"));
        assert!(conversation.matches_search(""));
        assert!(!conversation.matches_search("frontend"));
    }

    #[test]
    fn test_unnamed_conversation_display_name() {
        let conversation: Conversation =
            serde_json::from_value(json!({"conversation_id": "c-1"})).unwrap();
        assert_eq!(conversation.display_name(), "Untitled Conversation");
        assert!(!conversation.matches_search("untitled"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "N/A");
        assert_eq!(format_duration(Some(0.0)), "N/A");
        assert_eq!(format_duration(Some(125.0)), "2m 5s");
        assert_eq!(format_duration(Some(59.5)), "0m 59.5s");
    }

    #[test]
    fn test_detail_display_helpers() {
        let detail: ConversationDetail = serde_json::from_value(json!({
            "conversation_id": "c-1",
            "shutdown_reason": "participant_left_timeout",
            "analysis": {"score": 4},
            "id": 17
        }))
        .unwrap();

        assert_eq!(
            detail.shutdown_reason_label().as_deref(),
            Some("participant left timeout")
        );
        assert!(detail.analysis_text().unwrap().contains("\"score\": 4"));
        assert!(detail.decoded_transcript().is_none());
        assert_eq!(detail.extra.get("id"), Some(&json!(17)));
    }

    #[test]
    fn test_detail_tolerates_loosely_typed_fields() {
        let detail: ConversationDetail = serde_json::from_value(json!({
            "conversation_id": "abc",
            "duration": "312",
            "created_at": 1718000000,
            "participant_name": null,
            "shutdown_reason": "max_call_duration"
        }))
        .unwrap();

        assert_eq!(detail.duration_label(), "5m 12s");
        assert_eq!(
            detail.timestamp_labels(),
            vec![("Created", "1718000000".to_string())]
        );
        assert!(detail.participant_label().is_none());
        assert_eq!(
            detail.shutdown_reason_label().as_deref(),
            Some("max call duration")
        );
    }

    #[test]
    fn test_transcript_export_keeps_delivered_text() {
        let encoded = r#"[{"role":"user","content":"hi"}]"#;
        let detail: ConversationDetail = serde_json::from_value(json!({
            "conversation_id": "c-7",
            "transcript": encoded
        }))
        .unwrap();
        assert_eq!(detail.transcript_export().as_deref(), Some(encoded));
        assert_eq!(detail.transcript_file_name(), "conversation-c-7.txt");

        let structured: ConversationDetail = serde_json::from_value(json!({
            "conversation_id": "c-8",
            "transcript": [{"role": "user", "content": "hi"}]
        }))
        .unwrap();
        let exported: Value = serde_json::from_str(&structured.transcript_export().unwrap()).unwrap();
        assert_eq!(exported, json!([{"role": "user", "content": "hi"}]));

        let empty: ConversationDetail =
            serde_json::from_value(json!({"conversation_id": "c-9", "transcript": null})).unwrap();
        assert!(empty.transcript_export().is_none());
    }

    #[test]
    fn test_unparseable_duration_is_not_available() {
        let detail: ConversationDetail = serde_json::from_value(json!({
            "conversation_id": "abc",
            "duration": {"seconds": 12}
        }))
        .unwrap();

        assert_eq!(detail.duration_label(), "N/A");
    }
}
