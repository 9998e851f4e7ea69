//! # StudyMate Clients
//!
//! Concrete HTTP clients behind the `studymate-core` traits:
//!
//! - [`openai::EmbeddingsClient`] — OpenAI-style `/embeddings`.
//! - [`openai::ChatCompletionsClient`] — OpenAI-style `/chat/completions`,
//!   used for topic selection.
//! - [`qdrant::QdrantClient`] — Qdrant search plus the ingestion surface
//!   (collection creation, upsert).
//! - [`ollama::OllamaClient`] — Ollama `/api/generate` for the final answer.
//!
//! No client retries: every external call fails fast on first error and
//! surfaces as `StudyMateError::Retrieval`. Per-client request timeouts come
//! from the corresponding config section.

pub mod ollama;
pub mod openai;
pub mod qdrant;

pub use ollama::OllamaClient;
pub use openai::{ChatCompletionsClient, EmbeddingsClient};
pub use qdrant::{PointRecord, QdrantClient};
