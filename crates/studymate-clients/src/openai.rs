//! OpenAI-compatible embeddings and chat-completions clients.
//!
//! Both clients speak the standard OpenAI wire format, so any compatible
//! endpoint works by pointing `endpoint` elsewhere. Auth is a Bearer header,
//! skipped entirely when no API key is configured (local servers).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use studymate_core::config::{EmbeddingConfig, SelectorConfig};
use studymate_core::error::{Result, StudyMateError};
use studymate_core::traits::{Embedder, TopicModel};
use studymate_core::types::Message;

fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| StudyMateError::Config(format!("failed to build http client: {e}")))
}

fn resolve_api_key(configured: &str) -> String {
    if configured.is_empty() {
        std::env::var("OPENAI_API_KEY").unwrap_or_default()
    } else {
        configured.to_owned()
    }
}

fn apply_auth(req: reqwest::RequestBuilder, api_key: &str) -> reqwest::RequestBuilder {
    if api_key.is_empty() {
        req
    } else {
        req.header("Authorization", format!("Bearer {api_key}"))
    }
}

/// Client for the embedding service.
pub struct EmbeddingsClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl EmbeddingsClient {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_owned(),
            api_key: resolve_api_key(&config.api_key),
            model: config.model.clone(),
            client: build_http_client(config.timeout_secs)?,
        })
    }
}

#[async_trait]
impl Embedder for EmbeddingsClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/embeddings", self.base_url);
        let body = json!({ "model": self.model, "input": text });

        let req = apply_auth(self.client.post(&url).json(&body), &self.api_key);
        let resp = req.send().await.map_err(|e| {
            StudyMateError::Retrieval(format!("embedding connection failed ({url}): {e}"))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(StudyMateError::Retrieval(format!(
                "embedding service error {status}: {text}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| StudyMateError::Retrieval(format!("embedding response: {e}")))?;

        let vector: Vec<f32> = body["data"][0]["embedding"]
            .as_array()
            .ok_or_else(|| {
                StudyMateError::Retrieval("no embedding in service response".into())
            })?
            .iter()
            .filter_map(Value::as_f64)
            .map(|v| v as f32)
            .collect();

        tracing::debug!(dims = vector.len(), "embedded query text");
        Ok(vector)
    }
}

/// Client for the chat-completions service used by the topic selector.
pub struct ChatCompletionsClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_owned(),
            api_key: resolve_api_key(&config.api_key),
            model: config.model.clone(),
            client: build_http_client(config.timeout_secs)?,
        })
    }
}

#[async_trait]
impl TopicModel for ChatCompletionsClient {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
        });

        let req = apply_auth(self.client.post(&url).json(&body), &self.api_key);
        let resp = req.send().await.map_err(|e| {
            StudyMateError::Retrieval(format!("selector connection failed ({url}): {e}"))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(StudyMateError::Retrieval(format!(
                "selector service error {status}: {text}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| StudyMateError::Retrieval(format!("selector response: {e}")))?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| StudyMateError::Retrieval("no choices in selector response".into()))?;
        Ok(content.to_owned())
    }
}
