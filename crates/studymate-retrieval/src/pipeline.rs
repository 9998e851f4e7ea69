//! The chat orchestrator: one query in, one answer out.

use std::sync::Arc;

use studymate_core::TopicCatalog;
use studymate_core::error::Result;
use studymate_core::traits::{AnswerModel, Embedder, TopicModel, VectorIndex};
use studymate_core::types::{ChatResult, RetrievedPoint};

use crate::context::merge;
use crate::prompt::compose;
use crate::selector::TopicSelector;

/// Default number of nearest neighbors requested from the index.
pub const DEFAULT_TOP_K: usize = 5;

/// End-to-end coordinator: embed → search → select topics → merge →
/// compose → generate. All collaborators are injected; the pipeline holds
/// no mutable state and is safe to share across concurrent requests.
pub struct ChatPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    selector: TopicSelector,
    answerer: Arc<dyn AnswerModel>,
    catalog: Arc<TopicCatalog>,
    top_k: usize,
}

impl ChatPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        topic_model: Arc<dyn TopicModel>,
        answerer: Arc<dyn AnswerModel>,
        catalog: Arc<TopicCatalog>,
    ) -> Self {
        Self {
            embedder,
            index,
            selector: TopicSelector::new(topic_model),
            answerer,
            catalog,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer a query. Every stage failure propagates uncaught — no resume,
    /// no partial answer. An empty query flows through and ends up in the
    /// composer's unclear-question path; it is never rejected here.
    pub async fn answer(&self, query: &str) -> Result<ChatResult> {
        let vector = self.embedder.embed(query).await?;

        let points = self.index.search(&vector, self.top_k).await?;
        let vector_snippets: Vec<String> =
            points.iter().map(RetrievedPoint::display_text).collect();
        tracing::debug!(snippets = vector_snippets.len(), "vector context retrieved");

        let topic_snippets = self.selector.select(query, &self.catalog).await?;

        let context = merge(vector_snippets, topic_snippets);
        let messages = compose(&context, query);

        let response = self.answerer.generate(query, &messages).await?;
        tracing::debug!("generation complete");

        // Provenance is computed above but deliberately not returned yet;
        // the context_used field stays null until the product decides
        // whether clients should see it.
        Ok(ChatResult { response, context_used: None })
    }
}
