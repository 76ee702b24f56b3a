use crate::error::{Result, VectorStoreError};
use serde::{Deserialize, Serialize};

/// Flat inner-product similarity index.
///
/// Vectors are stored in insertion order and scanned exhaustively on search,
/// so results are exact. At the scale this system targets (thousands of
/// chunks) the linear scan is not a bottleneck; an approximate structure can
/// replace it as long as the deterministic result ordering is preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Fixed dimension every stored vector must have
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Append vectors to the end, in call order.
    ///
    /// The whole batch is dimension-checked before anything is appended, so a
    /// mismatch never leaves the index partially extended.
    pub fn add(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        for vector in &vectors {
            if vector.len() != self.dimension {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: self.dimension,
                    actual: vector.len(),
                });
            }
        }
        self.vectors.extend(vectors);
        Ok(())
    }

    /// Search for the `top_k` nearest vectors under inner-product similarity.
    ///
    /// Returns `(position, score)` pairs ordered by descending score; equal
    /// scores break ties by ascending position, so the earlier-inserted
    /// vector wins and results are deterministic. Returns fewer than `top_k`
    /// entries when fewer vectors exist.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<(usize, f32)>> {
        if top_k == 0 {
            return Err(VectorStoreError::invalid_argument("top_k must be > 0"));
        }
        if query.len() != self.dimension {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scores: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| (position, dot(query, vector)))
            .collect();

        scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scores.truncate(top_k);

        Ok(scores)
    }

    /// Number of stored vectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Verify internal consistency after deserialization
    pub(crate) fn validate(&self) -> Result<()> {
        for (position, vector) in self.vectors.iter().enumerate() {
            if vector.len() != self.dimension {
                return Err(VectorStoreError::corrupt(format!(
                    "vector at position {position} has dimension {} (index dimension {})",
                    vector.len(),
                    self.dimension
                )));
            }
        }
        Ok(())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_search() {
        let mut index = FlatIndex::new(3);
        index
            .add(vec![
                vec![1.0, 0.0, 0.0],
                vec![0.9, 0.1, 0.0],
                vec![0.0, 1.0, 0.0],
            ])
            .unwrap();

        assert_eq!(index.len(), 3);

        let results = index.search(&[1.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 0);
        assert!((results[0].1 - 1.0).abs() < 1e-6);
        assert_eq!(results[1].0, 1);
        assert!(results[1].1 > 0.8);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = FlatIndex::new(3);
        assert!(index.add(vec![vec![1.0, 0.0]]).is_err());

        // Batch checks happen before any append.
        let err = index.add(vec![vec![1.0, 0.0, 0.0], vec![0.5, 0.5]]);
        assert!(err.is_err());
        assert!(index.is_empty());

        index.add(vec![vec![1.0, 0.0, 0.0]]).unwrap();
        assert!(index.search(&[1.0, 0.0], 1).is_err());
    }

    #[test]
    fn test_search_fewer_than_top_k() {
        let mut index = FlatIndex::new(2);
        index.add(vec![vec![1.0, 0.0]]).unwrap();

        let results = index.search(&[1.0, 0.0], 5).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_rejects_zero_top_k() {
        let index = FlatIndex::new(2);
        assert!(matches!(
            index.search(&[1.0, 0.0], 0),
            Err(VectorStoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        let mut index = FlatIndex::new(2);
        // Identical vectors score identically against any query.
        index
            .add(vec![
                vec![0.6, 0.8],
                vec![0.6, 0.8],
                vec![0.6, 0.8],
            ])
            .unwrap();

        let results = index.search(&[0.6, 0.8], 3).unwrap();
        let positions: Vec<usize> = results.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_search_empty_index() {
        let index = FlatIndex::new(2);
        let results = index.search(&[1.0, 0.0], 3).unwrap();
        assert!(results.is_empty());
    }
}
