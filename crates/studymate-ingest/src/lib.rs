//! # StudyMate Ingest
//!
//! Offline tool that populates the vector index before the chat backend
//! ever runs a query. Two input kinds:
//!
//! - `.json` — a `materials.json` style document; each topic's content is
//!   embedded and the full topic record becomes the point payload.
//! - `.txt` / `.md` — plain text split into paragraph chunks; each chunk's
//!   text plus source metadata becomes the payload.
//!
//! The collection is created (vector size from config, cosine distance) if
//! absent. An embedding failure for a single item degrades to a zero vector
//! with a warning instead of aborting the whole upload.

pub mod chunker;

use std::path::Path;

use serde_json::{Value, json};
use uuid::Uuid;

use studymate_clients::{PointRecord, QdrantClient};
use studymate_core::TopicCatalog;
use studymate_core::error::{Result, StudyMateError};
use studymate_core::traits::Embedder;
use studymate_core::types::Topic;

use crate::chunker::DocChunk;

/// Embed `text`, falling back to a zero vector of `dimension` on failure so
/// one bad item cannot sink an entire batch.
async fn embed_or_zero(embedder: &dyn Embedder, text: &str, dimension: usize) -> Vec<f32> {
    match embedder.embed(text).await {
        Ok(vector) => vector,
        Err(err) => {
            tracing::warn!(%err, "embedding failed during ingest, using zero vector");
            vec![0.0; dimension]
        }
    }
}

fn topic_payload(topic: &Topic) -> Value {
    json!({
        "title": topic.title,
        "category": topic.category,
        "content": topic.content,
        "keyConcepts": topic.key_concepts,
        "studyQuestions": topic.study_questions,
    })
}

fn chunk_payload(chunk: &DocChunk) -> Value {
    json!({
        "text": chunk.text,
        "metadata": {
            "sourceFile": chunk.source_file,
            "chunkIndex": chunk.chunk_index,
        },
    })
}

/// Build upsert records for catalog topics.
pub async fn topic_points(
    topics: &[Topic],
    embedder: &dyn Embedder,
    dimension: usize,
) -> Vec<PointRecord> {
    let mut points = Vec::with_capacity(topics.len());
    for topic in topics {
        points.push(PointRecord {
            // The index wants uuid (or integer) ids, not topic slugs.
            id: Uuid::new_v4().to_string(),
            vector: embed_or_zero(embedder, &topic.content, dimension).await,
            payload: topic_payload(topic),
        });
    }
    points
}

/// Build upsert records for document chunks.
pub async fn chunk_points(
    chunks: &[DocChunk],
    embedder: &dyn Embedder,
    dimension: usize,
) -> Vec<PointRecord> {
    let mut points = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        points.push(PointRecord {
            id: Uuid::new_v4().to_string(),
            vector: embed_or_zero(embedder, &chunk.text, dimension).await,
            payload: chunk_payload(chunk),
        });
    }
    points
}

/// Ingest one file into the index. Returns the number of points uploaded.
pub async fn ingest_file(
    path: &Path,
    embedder: &dyn Embedder,
    index: &QdrantClient,
    dimension: usize,
) -> Result<usize> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let points = match extension.as_str() {
        "json" => {
            let catalog = TopicCatalog::load_from(path)?;
            tracing::info!(topics = catalog.len(), "ingesting topic catalog");
            topic_points(catalog.topics(), embedder, dimension).await
        }
        "txt" | "md" => {
            let raw = std::fs::read_to_string(path)?;
            let source = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_owned();
            let chunks = chunker::chunk_text(&raw, &source);
            tracing::info!(chunks = chunks.len(), source, "ingesting document");
            chunk_points(&chunks, embedder, dimension).await
        }
        other => {
            return Err(StudyMateError::Config(format!(
                "unsupported file type: .{other} (expected .json, .txt or .md)"
            )));
        }
    };

    index.ensure_collection(dimension).await?;
    index.upsert(&points).await?;
    Ok(points.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedEmbedder;
    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.5, 0.5])
        }
    }

    struct BrokenEmbedder;
    #[async_trait]
    impl Embedder for BrokenEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(StudyMateError::Retrieval("down".into()))
        }
    }

    fn topic() -> Topic {
        Topic {
            id: "mitosis".into(),
            title: "Mitosis".into(),
            category: "cells".into(),
            content: "One cell becomes two.".into(),
            key_concepts: vec!["prophase".into()],
            study_questions: vec!["What is mitosis?".into()],
        }
    }

    #[tokio::test]
    async fn topic_points_carry_full_record() {
        let points = topic_points(&[topic()], &FixedEmbedder, 2).await;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].vector, vec![0.5, 0.5]);
        assert_eq!(points[0].payload["content"], "One cell becomes two.");
        assert_eq!(points[0].payload["keyConcepts"][0], "prophase");
        // Ids are fresh uuids, not the topic slug.
        assert_ne!(points[0].id, "mitosis");
    }

    #[tokio::test]
    async fn embedding_failure_yields_zero_vector() {
        let points = topic_points(&[topic()], &BrokenEmbedder, 4).await;
        assert_eq!(points[0].vector, vec![0.0; 4]);
    }

    #[tokio::test]
    async fn chunk_points_carry_source_metadata() {
        let chunks = chunker::chunk_text("First paragraph.\n\nSecond paragraph.", "notes.md");
        let points = chunk_points(&chunks, &FixedEmbedder, 2).await;
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].payload["text"], "First paragraph.");
        assert_eq!(points[0].payload["metadata"]["sourceFile"], "notes.md");
        assert_eq!(points[1].payload["metadata"]["chunkIndex"], 1);
    }
}
