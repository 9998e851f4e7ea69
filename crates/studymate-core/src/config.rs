//! StudyMate configuration system.
//!
//! Loaded from a TOML file; every section has working defaults so a missing
//! or partial file still yields a usable configuration. Empty credential and
//! endpoint fields are filled from environment variables by the client
//! constructors (`OPENAI_API_KEY`, `QDRANT_URL`, `OLLAMA_BASE_URL`, ...).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StudyMateError};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyMateConfig {
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub qdrant: QdrantConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl StudyMateConfig {
    /// Load config from the default path (~/.studymate/config.toml),
    /// falling back to defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StudyMateError::Config(format!("failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| StudyMateError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studymate")
            .join("config.toml")
    }
}

/// Embedding service (OpenAI-style `/embeddings`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Must equal the vector size the index collection was created with.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Chat-completions service used for topic selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_selector_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Qdrant vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    #[serde(default = "default_qdrant_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Final-answer generation service (Ollama-style `/api/generate`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_generation_model")]
    pub model: String,
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

/// HTTP gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Topic catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".into()
}
fn default_embedding_model() -> String {
    "text-embedding-3-small".into()
}
fn default_selector_model() -> String {
    "gpt-4o-mini".into()
}
fn default_dimension() -> usize {
    1536
}
fn default_qdrant_url() -> String {
    "http://localhost:6333".into()
}
fn default_collection() -> String {
    "study_materials".into()
}
fn default_ollama_endpoint() -> String {
    "http://localhost:11434".into()
}
fn default_generation_model() -> String {
    "llama3.2".into()
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3001
}
fn default_catalog_path() -> String {
    "data/materials.json".into()
}
fn default_timeout() -> u64 {
    30
}
// Local generation can be slow on modest hardware.
fn default_generation_timeout() -> u64 {
    120
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_openai_endpoint(),
            api_key: String::new(),
            model: default_embedding_model(),
            dimension: default_dimension(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_openai_endpoint(),
            api_key: String::new(),
            model: default_selector_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: default_qdrant_url(),
            api_key: String::new(),
            collection: default_collection(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ollama_endpoint(),
            model: default_generation_model(),
            timeout_secs: default_generation_timeout(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = StudyMateConfig::default();
        assert_eq!(config.embedding.dimension, 1536);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.generation.model, "llama3.2");
        assert_eq!(config.gateway.port, 3001);
        assert!(config.qdrant.api_key.is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: StudyMateConfig = toml::from_str(
            r#"
            [qdrant]
            url = "http://qdrant.internal:6333"
            collection = "biology"

            [gateway]
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.qdrant.url, "http://qdrant.internal:6333");
        assert_eq!(config.qdrant.collection, "biology");
        assert_eq!(config.gateway.port, 8080);
        // Untouched sections keep their defaults.
        assert_eq!(config.generation.endpoint, "http://localhost:11434");
        assert_eq!(config.catalog.path, "data/materials.json");
    }

    #[test]
    fn empty_toml_is_default() {
        let config: StudyMateConfig = toml::from_str("").unwrap();
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.selector.model, "gpt-4o-mini");
    }
}
