use crate::error::{Result, VectorStoreError};
use crate::types::Chunk;
use serde::{Deserialize, Serialize};

/// Insertion-ordered chunk storage.
///
/// A chunk's identity is purely positional: its index here must always equal
/// the index of its embedding in the similarity index. The store never
/// reorders, deduplicates, or deletes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append chunks in order at the end
    pub fn append(&mut self, chunks: Vec<Chunk>) {
        self.chunks.extend(chunks);
    }

    /// Positional lookup
    pub fn get(&self, index: usize) -> Result<&Chunk> {
        self.chunks.get(index).ok_or(VectorStoreError::OutOfRange {
            index,
            len: self.chunks.len(),
        })
    }

    /// Number of stored chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate over chunks in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut store = ChunkStore::new();
        store.append(vec![Chunk::new("alpha", "s1"), Chunk::new("beta", "s1")]);
        store.append(vec![Chunk::new("gamma", "s2")]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().text, "alpha");
        assert_eq!(store.get(2).unwrap().source_id, "s2");
    }

    #[test]
    fn test_get_out_of_range() {
        let mut store = ChunkStore::new();
        store.append(vec![Chunk::new("alpha", "s1")]);

        let err = store.get(1).unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::OutOfRange { index: 1, len: 1 }
        ));
    }

    #[test]
    fn test_empty_store() {
        let store = ChunkStore::new();
        assert!(store.is_empty());
        assert!(store.get(0).is_err());
    }
}
