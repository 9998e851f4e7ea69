//! Qdrant vector index client (plain REST, no SDK).
//!
//! The search path is the hot path; `ensure_collection` and `upsert` exist
//! for the offline ingestion tool only.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use studymate_core::config::QdrantConfig;
use studymate_core::error::{Result, StudyMateError};
use studymate_core::traits::VectorIndex;
use studymate_core::types::RetrievedPoint;

/// One `{id, vector, payload}` triple for upsert.
#[derive(Debug, Clone, Serialize)]
pub struct PointRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: Value,
}

pub struct QdrantClient {
    base_url: String,
    collection: String,
    api_key: String,
    client: reqwest::Client,
}

impl QdrantClient {
    pub fn new(config: &QdrantConfig) -> Result<Self> {
        let base_url = if config.url.is_empty() {
            std::env::var("QDRANT_URL").unwrap_or_default()
        } else {
            config.url.clone()
        };
        let collection = if config.collection.is_empty() {
            std::env::var("QDRANT_COLLECTION").unwrap_or_default()
        } else {
            config.collection.clone()
        };
        let api_key = if config.api_key.is_empty() {
            std::env::var("QDRANT_API_KEY").unwrap_or_default()
        } else {
            config.api_key.clone()
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StudyMateError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            collection,
            api_key,
            client,
        })
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            req
        } else {
            req.header("api-key", &self.api_key)
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder, what: &str) -> Result<Value> {
        let resp = self
            .apply_auth(req)
            .send()
            .await
            .map_err(|e| StudyMateError::Retrieval(format!("qdrant {what} failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(StudyMateError::Retrieval(format!(
                "qdrant {what} error {status}: {text}"
            )));
        }

        resp.json()
            .await
            .map_err(|e| StudyMateError::Retrieval(format!("qdrant {what} response: {e}")))
    }

    /// Create the collection with the given vector size and cosine distance
    /// if it does not already exist.
    pub async fn ensure_collection(&self, vector_size: usize) -> Result<()> {
        let url = format!("{}/collections", self.base_url);
        let body = self.send(self.client.get(&url), "list collections").await?;

        let exists = body["result"]["collections"]
            .as_array()
            .map(|cols| {
                cols.iter()
                    .any(|c| c["name"].as_str() == Some(self.collection.as_str()))
            })
            .unwrap_or(false);
        if exists {
            return Ok(());
        }

        tracing::info!(collection = %self.collection, vector_size, "creating qdrant collection");
        let url = format!("{}/collections/{}", self.base_url, self.collection);
        let body = json!({ "vectors": { "size": vector_size, "distance": "Cosine" } });
        self.send(self.client.put(&url).json(&body), "create collection")
            .await?;
        Ok(())
    }

    /// Upsert a batch of points into the collection.
    pub async fn upsert(&self, points: &[PointRecord]) -> Result<()> {
        let url = format!(
            "{}/collections/{}/points?wait=true",
            self.base_url, self.collection
        );
        let body = json!({ "points": points });
        self.send(self.client.put(&url).json(&body), "upsert").await?;
        tracing::info!(points = points.len(), collection = %self.collection, "upserted points");
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for QdrantClient {
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<RetrievedPoint>> {
        let url = format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection
        );
        let body = json!({
            "vector": vector,
            "top": top_k,
            "with_payload": true,
        });

        let mut response = self.send(self.client.post(&url).json(&body), "search").await?;

        let points: Vec<RetrievedPoint> = serde_json::from_value(response["result"].take())
            .map_err(|e| StudyMateError::Retrieval(format!("qdrant search result: {e}")))?;
        tracing::debug!(hits = points.len(), "qdrant search complete");
        Ok(points)
    }
}
