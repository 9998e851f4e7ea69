//! Context merging.

/// Merge the two retrieval signals into one ordered snippet list: vector
/// search hits first, then topic-selector content, each source keeping its
/// internal order. No deduplication, no re-ranking, no length cap — the
/// composer handles presentation and the generation service owns truncation.
pub fn merge(vector_snippets: Vec<String>, topic_snippets: Vec<String>) -> Vec<String> {
    let mut merged = vector_snippets;
    merged.extend(topic_snippets);
    merged
}
