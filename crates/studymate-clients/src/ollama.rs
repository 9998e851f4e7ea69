//! Ollama generation client for the final answer.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use studymate_core::config::GenerationConfig;
use studymate_core::error::{Result, StudyMateError};
use studymate_core::traits::AnswerModel;
use studymate_core::types::Message;

/// Compatibility payload for `/api/generate`: both a flat `prompt` and the
/// structured `messages` are populated. Only one is consumed depending on
/// the backend; sending both is intentional over-specification so either
/// style of backend works. Open question whether both are still needed.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub messages: &'a [Message],
}

pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let base_url = std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| config.endpoint.clone());
        let model = std::env::var("MODEL_NAME").unwrap_or_else(|_| config.model.clone());
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StudyMateError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_owned(), model, client })
    }

    /// True when the generation service answers on `/api/tags`.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl AnswerModel for OllamaClient {
    async fn generate(&self, prompt: &str, messages: &[Message]) -> Result<Value> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest { model: &self.model, prompt, stream: false, messages };

        let resp = self.client.post(&url).json(&body).send().await.map_err(|e| {
            StudyMateError::Retrieval(format!("generation connection failed ({url}): {e}"))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(StudyMateError::Retrieval(format!(
                "generation service error {status}: {text}"
            )));
        }

        // The raw body is the pipeline's result; no fields are interpreted here.
        resp.json()
            .await
            .map_err(|e| StudyMateError::Retrieval(format!("generation response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_carries_both_encodings() {
        let messages =
            [Message::system("be helpful"), Message::user("What is mitosis?")];
        let req = GenerateRequest {
            model: "llama3.2",
            prompt: "What is mitosis?",
            stream: false,
            messages: &messages,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["model"], "llama3.2");
        assert_eq!(value["prompt"], "What is mitosis?");
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"].as_array().unwrap().len(), 2);
        assert_eq!(value["messages"][0]["role"], "system");
    }
}
