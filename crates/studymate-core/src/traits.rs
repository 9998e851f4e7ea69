//! Client traits — the seams between the pipeline and its external services.
//!
//! Every external dependency is reached through one of these traits so the
//! pipeline can be exercised in tests with in-process fakes. Concrete HTTP
//! implementations live in `studymate-clients`.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{Message, RetrievedPoint};

/// Turns free text into a fixed-length embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed `text`. Any input is accepted, including the empty string.
    /// Transport or service failure surfaces as `StudyMateError::Retrieval`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Nearest-neighbor search against the external vector index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return up to `top_k` scored points in the order the index provides
    /// them (assumed score-descending, never re-sorted locally). A vector of
    /// the wrong dimensionality is the index's error to report, not ours.
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<RetrievedPoint>>;
}

/// Chat-completions backend used by the topic selector.
#[async_trait]
pub trait TopicModel: Send + Sync {
    /// One completion round; returns the assistant message content.
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String>;
}

/// Generation backend that produces the final answer.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    /// Send the compatibility payload (flat `prompt` plus structured
    /// `messages`) and return the service's raw response body.
    async fn generate(&self, prompt: &str, messages: &[Message]) -> Result<Value>;
}
