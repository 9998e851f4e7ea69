//! Domain and wire types shared across the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Roles accepted by the generation services. The composed prompt only ever
/// carries one `System` and one `User` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-tagged prompt message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Payload fields tried, in order, when extracting display text from a
/// retrieved point. This ordered fallback is a stable contract: points
/// ingested from documents carry `text`, points ingested from the topic
/// file carry `content`, anything else renders as an empty snippet.
pub const PAYLOAD_TEXT_FIELDS: [&str; 2] = ["text", "content"];

/// One nearest-neighbor hit from the vector index, payload attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedPoint {
    pub id: Value,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl RetrievedPoint {
    /// Extract the display text from the payload via [`PAYLOAD_TEXT_FIELDS`].
    /// Missing or non-string fields fall through to an empty string.
    pub fn display_text(&self) -> String {
        for field in PAYLOAD_TEXT_FIELDS {
            if let Some(text) = self.payload.get(field).and_then(Value::as_str) {
                return text.to_owned();
            }
        }
        String::new()
    }
}

/// One entry of the curated study-material catalog. Field names follow the
/// `materials.json` schema, which is camelCase on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub study_questions: Vec<String>,
}

/// Characters of topic content included in a selection summary.
pub const TOPIC_SUMMARY_CHARS: usize = 200;

/// Ephemeral projection of a [`Topic`] used only inside the topic-selection
/// prompt, content truncated to bound prompt size. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TopicSummary {
    pub id: String,
    pub title: String,
    pub summary: String,
}

impl TopicSummary {
    pub fn of(topic: &Topic) -> Self {
        Self {
            id: topic.id.clone(),
            title: topic.title.clone(),
            summary: topic.content.chars().take(TOPIC_SUMMARY_CHARS).collect(),
        }
    }
}

/// Final pipeline output. `response` is the generation service's raw
/// response body, passed through untouched. `context_used` is always `None`
/// for now: the pipeline computes provenance but the current product wiring
/// discards it before it reaches the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResult {
    pub response: Value,
    pub context_used: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(payload: Value) -> RetrievedPoint {
        RetrievedPoint {
            id: json!("p1"),
            score: 0.9,
            payload: payload.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn display_text_prefers_text_field() {
        let p = point(json!({"text": "from text", "content": "from content"}));
        assert_eq!(p.display_text(), "from text");
    }

    #[test]
    fn display_text_falls_back_to_content() {
        let p = point(json!({"content": "from content", "title": "ignored"}));
        assert_eq!(p.display_text(), "from content");
    }

    #[test]
    fn display_text_defaults_to_empty() {
        assert_eq!(point(json!({"title": "no body"})).display_text(), "");
        assert_eq!(point(json!({"text": 42})).display_text(), "");
    }

    #[test]
    fn summary_truncates_on_char_boundary() {
        let topic = Topic {
            id: "t".into(),
            title: "T".into(),
            category: "c".into(),
            content: "é".repeat(300),
            key_concepts: vec![],
            study_questions: vec![],
        };
        let summary = TopicSummary::of(&topic);
        assert_eq!(summary.summary.chars().count(), TOPIC_SUMMARY_CHARS);
    }

    #[test]
    fn topic_deserializes_camel_case() {
        let topic: Topic = serde_json::from_value(json!({
            "id": "mitosis",
            "title": "Mitosis",
            "category": "cell-biology",
            "content": "Cells divide.",
            "keyConcepts": ["prophase"],
            "studyQuestions": ["What is mitosis?"]
        }))
        .unwrap();
        assert_eq!(topic.key_concepts, vec!["prophase"]);
        assert_eq!(topic.study_questions.len(), 1);
    }

    #[test]
    fn message_roles_serialize_lowercase() {
        let msg = serde_json::to_value(Message::system("hi")).unwrap();
        assert_eq!(msg["role"], "system");
        let msg = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(msg["role"], "user");
    }
}
