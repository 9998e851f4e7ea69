//! Plain-text chunking for document ingestion.
//!
//! Splits on blank lines and packs consecutive paragraphs together until a
//! chunk reaches the target size. Keeps chunks small enough to embed well
//! while avoiding one-line fragments.

/// Target upper bound for a chunk, in characters.
pub const MAX_CHUNK_CHARS: usize = 800;

/// One chunk of a source document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocChunk {
    pub text: String,
    pub source_file: String,
    pub chunk_index: usize,
}

/// Split raw text into chunks. Whitespace-only input yields no chunks.
pub fn chunk_text(raw: &str, source_file: &str) -> Vec<DocChunk> {
    let mut chunks: Vec<DocChunk> = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, chunks: &mut Vec<DocChunk>| {
        if !current.trim().is_empty() {
            chunks.push(DocChunk {
                text: current.trim().to_owned(),
                source_file: source_file.to_owned(),
                chunk_index: chunks.len(),
            });
        }
        current.clear();
    };

    for paragraph in raw.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        if !current.is_empty() && current.chars().count() + paragraph.chars().count() > MAX_CHUNK_CHARS
        {
            flush(&mut current, &mut chunks);
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }
    flush(&mut current, &mut chunks);

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_nothing() {
        assert!(chunk_text("", "f.txt").is_empty());
        assert!(chunk_text("   \n\n  \n", "f.txt").is_empty());
    }

    #[test]
    fn short_paragraphs_pack_together() {
        let chunks = chunk_text("one\n\ntwo\n\nthree", "f.txt");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "one\n\ntwo\n\nthree");
        assert_eq!(chunks[0].chunk_index, 0);
    }

    #[test]
    fn long_paragraphs_split_into_chunks() {
        let long = "x".repeat(MAX_CHUNK_CHARS);
        let raw = format!("{long}\n\n{long}\n\nshort tail");
        let chunks = chunk_text(&raw, "book.md");
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].text, "short tail");
        assert_eq!(chunks[2].chunk_index, 2);
        assert!(chunks.iter().all(|c| c.source_file == "book.md"));
    }

    #[test]
    fn indices_are_sequential() {
        let long = "y".repeat(MAX_CHUNK_CHARS);
        let raw = format!("{long}\n\n{long}");
        let chunks = chunk_text(&raw, "f.txt");
        let indices: Vec<usize> = chunks.iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
