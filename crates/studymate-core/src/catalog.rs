//! The in-memory topic catalog.
//!
//! Loaded once at startup from a `materials.json` style document and treated
//! as read-only for the lifetime of the process, so it can be shared across
//! concurrent requests without synchronization.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyMateError};
use crate::types::Topic;

/// Read-only set of curated study topics, indexed by id.
#[derive(Debug, Clone, Serialize)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct CatalogFile {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Build a catalog from already-parsed topics. Topic ids must be unique;
    /// on a duplicate the first entry wins and the rest are dropped.
    pub fn from_topics(topics: Vec<Topic>) -> Self {
        let mut by_id = HashMap::with_capacity(topics.len());
        let mut kept = Vec::with_capacity(topics.len());
        for topic in topics {
            if by_id.contains_key(&topic.id) {
                tracing::warn!(id = %topic.id, "duplicate topic id in catalog, keeping first");
                continue;
            }
            by_id.insert(topic.id.clone(), kept.len());
            kept.push(topic);
        }
        Self { topics: kept, by_id }
    }

    /// Load a catalog from a JSON document with a top-level `topics` array.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StudyMateError::Catalog(format!("failed to read {}: {e}", path.display()))
        })?;
        let file: CatalogFile = serde_json::from_str(&raw).map_err(|e| {
            StudyMateError::Catalog(format!("failed to parse {}: {e}", path.display()))
        })?;
        let catalog = Self::from_topics(file.topics);
        tracing::info!(topics = catalog.len(), path = %path.display(), "topic catalog loaded");
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.by_id.get(id).map(|&i| &self.topics[i])
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
