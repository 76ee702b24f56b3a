use crate::error::{Result, VectorStoreError};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex};
use tokio::task::spawn_blocking;

/// Dimension of the reference embedding model (all-MiniLM-L6-v2)
pub const DEFAULT_DIMENSION: usize = 384;

/// Maps text to fixed-length dense vectors.
///
/// Implementations must be deterministic for identical input text and return
/// one vector per input, in input order. The store normalizes vectors itself,
/// so implementations are not required to.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Fixed output dimension
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, one vector per text, preserving order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Embedder backed by the fastembed all-MiniLM-L6-v2 model.
///
/// Inference is blocking, so calls run on the tokio blocking pool. The model
/// downloads on first use; offline environments should use [`HashedEmbedder`]
/// instead.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastEmbedder {
    pub fn new() -> Result<Self> {
        log::info!("Initializing fastembed model (all-MiniLM-L6-v2)");
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false),
        )
        .map_err(|e| VectorStoreError::embedding(format!("model init failed: {e}")))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    fn dimension(&self) -> usize {
        DEFAULT_DIMENSION
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let batch = texts.to_vec();
        let vectors = spawn_blocking(move || -> Result<Vec<Vec<f32>>> {
            let mut model = model
                .lock()
                .map_err(|_| VectorStoreError::embedding("embedding model lock poisoned"))?;
            model
                .embed(batch, None)
                .map_err(|e| VectorStoreError::embedding(format!("inference failed: {e}")))
        })
        .await
        .map_err(|e| VectorStoreError::embedding(format!("join embedding task: {e}")))??;

        for vector in &vectors {
            if vector.len() != DEFAULT_DIMENSION {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: DEFAULT_DIMENSION,
                    actual: vector.len(),
                });
            }
        }

        Ok(vectors)
    }
}

/// Deterministic embedder hashing character trigrams into buckets.
///
/// No model download, no inference cost, stable across processes. Texts that
/// share character trigrams land in overlapping buckets and therefore score
/// close under inner product. Quality is far below a learned model; it exists
/// for tests and fully offline runs.
pub struct HashedEmbedder {
    dimension: usize,
}

impl HashedEmbedder {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

#[async_trait]
impl Embedder for HashedEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| hash_trigrams(text, self.dimension))
            .collect())
    }
}

fn hash_trigrams(text: &str, dimension: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dimension];
    let chars: Vec<char> = text.to_lowercase().chars().collect();

    if chars.len() < 3 {
        if !chars.is_empty() {
            let token: String = chars.iter().collect();
            vector[bucket_for(&token, dimension)] += 1.0;
        }
    } else {
        for trigram in chars.windows(3) {
            let token: String = trigram.iter().collect();
            vector[bucket_for(&token, dimension)] += 1.0;
        }
    }

    l2_normalize(&mut vector);
    vector
}

fn bucket_for(token: &str, dimension: usize) -> usize {
    let digest = Sha256::digest(token.as_bytes());
    let raw = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    raw as usize % dimension
}

/// Scale a vector to unit L2 norm in place. Zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
