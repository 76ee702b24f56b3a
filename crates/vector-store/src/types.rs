use serde::{Deserialize, Serialize};

/// A bounded substring of an ingested document plus its owning source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text
    pub text: String,

    /// Identifier of the ingestion event that produced this chunk
    pub source_id: String,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub fn new(text: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_id: source_id.into(),
        }
    }
}

/// A ranked query match
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched chunk
    pub chunk: Chunk,

    /// Cosine similarity to the query (inner product of normalized vectors)
    pub score: f32,

    /// Position of the chunk in the store
    pub position: usize,
}
