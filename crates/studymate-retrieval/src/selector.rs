//! Topic selection: ask a chat model which catalog topics bear on a query.
//!
//! One completion call per query, temperature 0. The failure behavior is
//! deliberately asymmetric: a transport failure from the model propagates,
//! a reply that is not a JSON id array degrades to "no topic matches."

use std::sync::Arc;

use studymate_core::TopicCatalog;
use studymate_core::error::Result;
use studymate_core::traits::TopicModel;
use studymate_core::types::{Message, TopicSummary};

const SELECTION_INSTRUCTION: &str = "\
You match a student's question against a list of study topics. \
Reply with only a JSON array of the topic ids relevant to the question, \
for example: [\"cell-division\", \"genetics\"]. \
Reply with [] if no topic applies. Do not add any other text.";

pub struct TopicSelector {
    model: Arc<dyn TopicModel>,
}

impl TopicSelector {
    pub fn new(model: Arc<dyn TopicModel>) -> Self {
        Self { model }
    }

    /// Return the `content` of every catalog topic the model deems relevant,
    /// in the order the model listed them. Ids the model invents are dropped
    /// silently; they are expected, benign noise.
    pub async fn select(&self, query: &str, catalog: &TopicCatalog) -> Result<Vec<String>> {
        let summaries: Vec<TopicSummary> =
            catalog.topics().iter().map(TopicSummary::of).collect();

        let user_content = format!(
            "Topics:\n{}\n\nQuestion:\n{}",
            serde_json::to_string(&summaries)?,
            query
        );
        let messages =
            [Message::system(SELECTION_INSTRUCTION), Message::user(user_content)];

        let raw = self.model.complete(&messages, 0.0).await?;

        let ids = match serde_json::from_str::<Vec<String>>(raw.trim()) {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!(%err, raw, "topic selection reply was not a JSON id array");
                return Ok(Vec::new());
            }
        };

        let matched: Vec<String> = ids
            .iter()
            .filter_map(|id| catalog.get(id))
            .map(|topic| topic.content.clone())
            .collect();
        tracing::debug!(selected = ids.len(), resolved = matched.len(), "topic selection done");
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use studymate_core::error::StudyMateError;
    use studymate_core::types::Topic;

    struct ScriptedModel {
        reply: std::result::Result<String, String>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn replying(reply: &str) -> Self {
            Self { reply: Ok(reply.to_string()), calls: AtomicUsize::new(0) }
        }

        fn failing(message: &str) -> Self {
            Self { reply: Err(message.to_string()), calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl TopicModel for ScriptedModel {
        async fn complete(&self, _messages: &[Message], temperature: f32) -> Result<String> {
            assert_eq!(temperature, 0.0);
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(message) => Err(StudyMateError::Retrieval(message.clone())),
            }
        }
    }

    fn catalog() -> TopicCatalog {
        TopicCatalog::from_topics(vec![
            Topic {
                id: "photosynthesis".into(),
                title: "Photosynthesis".into(),
                category: "plants".into(),
                content: "Plants convert light into chemical energy.".into(),
                key_concepts: vec!["chlorophyll".into()],
                study_questions: vec![],
            },
            Topic {
                id: "mitosis".into(),
                title: "Mitosis".into(),
                category: "cells".into(),
                content: "One cell becomes two identical cells.".into(),
                key_concepts: vec![],
                study_questions: vec![],
            },
        ])
    }

    #[tokio::test]
    async fn resolves_selected_ids_to_content() {
        let model = Arc::new(ScriptedModel::replying(r#"["photosynthesis"]"#));
        let selector = TopicSelector::new(model.clone());
        let matched = selector.select("How do plants eat?", &catalog()).await.unwrap();
        assert_eq!(matched, vec!["Plants convert light into chemical energy.".to_string()]);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_ids_are_dropped_silently() {
        let model = Arc::new(ScriptedModel::replying(r#"["mitosis", "quantum-tunnelling"]"#));
        let selector = TopicSelector::new(model);
        let matched = selector.select("cells?", &catalog()).await.unwrap();
        assert_eq!(matched.len(), 1);
        assert!(matched[0].contains("identical cells"));
    }

    #[tokio::test]
    async fn malformed_reply_degrades_to_empty() {
        for reply in [
            "Sure! The relevant topics are photosynthesis.",
            "{\"ids\": [\"mitosis\"]}",
            "[1, 2, 3]",
            "[\"unterminated",
            "",
            "null",
        ] {
            let selector = TopicSelector::new(Arc::new(ScriptedModel::replying(reply)));
            let matched = selector.select("anything", &catalog()).await.unwrap();
            assert!(matched.is_empty(), "reply {reply:?} should yield no matches");
        }
    }

    #[tokio::test]
    async fn whitespace_around_array_is_tolerated() {
        let selector =
            TopicSelector::new(Arc::new(ScriptedModel::replying("  [\"mitosis\"]\n")));
        let matched = selector.select("cells?", &catalog()).await.unwrap();
        assert_eq!(matched.len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let selector = TopicSelector::new(Arc::new(ScriptedModel::failing("timeout")));
        let err = selector.select("anything", &catalog()).await.unwrap_err();
        assert!(matches!(err, StudyMateError::Retrieval(_)));
    }
}
