//! # StudyMate Retrieval
//!
//! The retrieval-and-prompt-assembly pipeline:
//!
//! ```text
//! query
//!   → embed                       (embedding service)
//!   → vector search, top-5        (Qdrant)
//!   → topic selection             (chat model picks catalog ids)
//!   → merge contexts              (vector snippets first)
//!   → compose prompt              (system constitution + user turn)
//!   → generate                    (Ollama)
//! → ChatResult
//! ```
//!
//! Strictly sequential per request, fail-fast: the first `Retrieval` error
//! aborts the chain. The only locally recovered faults are a malformed
//! topic-selection reply and topic ids missing from the catalog.

pub mod context;
pub mod pipeline;
pub mod prompt;
pub mod selector;

pub use pipeline::ChatPipeline;
pub use selector::TopicSelector;
