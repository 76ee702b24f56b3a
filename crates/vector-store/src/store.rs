use crate::chunk_store::ChunkStore;
use crate::embeddings::{l2_normalize, Embedder};
use crate::error::{Result, VectorStoreError};
use crate::flat_index::FlatIndex;
use crate::paths::{chunks_path, index_path, lock_path};
use crate::types::{Chunk, SearchResult};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::spawn_blocking;

pub const STORE_SCHEMA_VERSION: u32 = 1;

/// Floor on how many candidates a search fetches before source filtering.
///
/// Over-fetching keeps filtering from starving the result set below `top_k`
/// when the raw top matches belong to disabled sources. Tunable; not yet
/// scaled to the fraction of disabled sources.
pub const MIN_CANDIDATE_FETCH: usize = 10;

/// Store behavior knobs
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Deadline for a single embedder call; `None` waits indefinitely
    pub embed_timeout: Option<Duration>,
}

/// Chunked vector index: chunk storage, similarity search, source-scoped
/// filtering, and on-disk persistence behind one ingestion/query API.
///
/// The chunk store and the similarity index are kept aligned by position at
/// every observable point: chunk `i` owns vector `i`. Ingestion is
/// all-or-nothing with respect to persisted state.
pub struct VectorStore {
    chunks: ChunkStore,
    index: FlatIndex,
    embedder: Arc<dyn Embedder>,
    dir: PathBuf,
    config: StoreConfig,
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("chunks", &self.chunks)
            .field("index", &self.index)
            .field("dir", &self.dir)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    schema_version: u32,
    index: FlatIndex,
}

#[derive(Serialize, Deserialize)]
struct PersistedChunks {
    schema_version: u32,
    chunks: ChunkStore,
}

impl VectorStore {
    /// Open a store at `dir` with default configuration
    pub async fn open(dir: impl AsRef<Path>, embedder: Arc<dyn Embedder>) -> Result<Self> {
        Self::open_with_config(dir, embedder, StoreConfig::default()).await
    }

    /// Open a store at `dir`, loading persisted state when present.
    ///
    /// Both persisted halves must be present, parseable, of the embedder's
    /// dimension, and of equal length, or this fails with `CorruptState`.
    /// With no persisted state the store starts empty.
    pub async fn open_with_config(
        dir: impl AsRef<Path>,
        embedder: Arc<dyn Embedder>,
        config: StoreConfig,
    ) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        log::info!("Opening vector store at {}", dir.display());

        let index_file = index_path(&dir);
        let chunks_file = chunks_path(&dir);

        let (index, chunks) = match (index_file.exists(), chunks_file.exists()) {
            (false, false) => (FlatIndex::new(embedder.dimension()), ChunkStore::new()),
            (true, true) => load_state(&index_file, &chunks_file, embedder.dimension()).await?,
            (index_present, _) => {
                let missing = if index_present { &chunks_file } else { &index_file };
                return Err(VectorStoreError::corrupt(format!(
                    "persisted half missing: {}",
                    missing.display()
                )));
            }
        };

        log::info!("Loaded {} chunks", chunks.len());

        Ok(Self {
            chunks,
            index,
            embedder,
            dir,
            config,
        })
    }

    /// Ingest a batch of chunk texts under one source.
    ///
    /// The whole batch is embedded in a single embedder call. On success both
    /// halves are durably persisted before this returns; on any failure no
    /// state is committed, in memory or on disk. An empty batch is a no-op
    /// and triggers no write.
    pub async fn ingest(&mut self, texts: Vec<String>, source_id: &str) -> Result<()> {
        if texts.is_empty() {
            log::debug!("Ingest of zero texts for source '{source_id}', nothing to do");
            return Ok(());
        }

        log::info!("Ingesting {} chunks for source '{source_id}'", texts.len());

        let _lock = acquire_write_lock(&self.dir).await?;

        let mut vectors = self.embed_batch(&texts).await?;
        for vector in &mut vectors {
            l2_normalize(vector);
        }

        // Stage the append on copies and persist before committing in
        // memory, so a failed write leaves both views untouched.
        let mut index = self.index.clone();
        index.add(vectors)?;
        let mut chunks = self.chunks.clone();
        chunks.append(
            texts
                .into_iter()
                .map(|text| Chunk::new(text, source_id))
                .collect(),
        );

        persist_state(&self.dir, &index, &chunks).await?;
        self.index = index;
        self.chunks = chunks;

        log::info!("Ingest complete. Total chunks: {}", self.chunks.len());
        Ok(())
    }

    /// Query for the `top_k` most similar chunks, restricted to
    /// `allowed_sources` when given.
    ///
    /// Final order is the similarity ranking restricted to allowed sources.
    /// An empty result is a valid outcome (empty store, or no source
    /// enabled), never an error.
    pub async fn query(
        &self,
        text: &str,
        top_k: usize,
        allowed_sources: Option<&HashSet<String>>,
    ) -> Result<Vec<SearchResult>> {
        if top_k == 0 {
            return Err(VectorStoreError::invalid_argument("top_k must be > 0"));
        }
        if allowed_sources.is_some_and(HashSet::is_empty) {
            log::debug!("Query with no sources enabled, returning empty result");
            return Ok(Vec::new());
        }
        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        log::debug!("Querying for '{text}' (top_k: {top_k})");

        let query_texts = vec![text.to_string()];
        let mut query_vector = self
            .embed_batch(&query_texts)
            .await?
            .pop()
            .ok_or_else(|| VectorStoreError::embedding("embedder returned no query vector"))?;
        l2_normalize(&mut query_vector);

        let fetch = top_k.max(MIN_CANDIDATE_FETCH);
        let candidates = self.index.search(&query_vector, fetch)?;

        let mut results = Vec::new();
        for (position, score) in candidates {
            let chunk = match self.chunks.get(position) {
                Ok(chunk) => chunk,
                Err(_) => {
                    // Length invariant violated; skip rather than fail the query.
                    log::warn!(
                        "Search returned position {position} beyond chunk store length {}",
                        self.chunks.len()
                    );
                    continue;
                }
            };

            if let Some(allowed) = allowed_sources {
                if !allowed.contains(&chunk.source_id) {
                    continue;
                }
            }

            results.push(SearchResult {
                chunk: chunk.clone(),
                score,
                position,
            });
            if results.len() == top_k {
                break;
            }
        }

        log::debug!("Found {} results", results.len());
        Ok(results)
    }

    /// Serialize both halves to the store directory
    pub async fn persist(&self) -> Result<()> {
        persist_state(&self.dir, &self.index, &self.chunks).await
    }

    /// Number of ingested chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the store holds no chunks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of indexed vectors; always equals [`len`](Self::len)
    #[must_use]
    pub fn vector_count(&self) -> usize {
        self.index.len()
    }

    /// Fixed embedding dimension of this store
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let embed = self.embedder.embed(texts);
        let vectors = match self.config.embed_timeout {
            Some(limit) => tokio::time::timeout(limit, embed).await.map_err(|_| {
                VectorStoreError::embedding(format!("embedder timed out after {limit:?}"))
            })??,
            None => embed.await?,
        };

        if vectors.len() != texts.len() {
            return Err(VectorStoreError::embedding(format!(
                "embedder returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }
}

async fn load_state(
    index_file: &Path,
    chunks_file: &Path,
    expected_dimension: usize,
) -> Result<(FlatIndex, ChunkStore)> {
    let index_bytes = tokio::fs::read(index_file).await?;
    let persisted_index: PersistedIndex = serde_json::from_slice(&index_bytes)
        .map_err(|e| VectorStoreError::corrupt(format!("unparseable index artifact: {e}")))?;
    if persisted_index.schema_version != STORE_SCHEMA_VERSION {
        return Err(VectorStoreError::corrupt(format!(
            "unsupported index schema_version {} (expected {STORE_SCHEMA_VERSION})",
            persisted_index.schema_version
        )));
    }

    let chunk_bytes = tokio::fs::read(chunks_file).await?;
    let persisted_chunks: PersistedChunks = serde_json::from_slice(&chunk_bytes)
        .map_err(|e| VectorStoreError::corrupt(format!("unparseable chunks artifact: {e}")))?;
    if persisted_chunks.schema_version != STORE_SCHEMA_VERSION {
        return Err(VectorStoreError::corrupt(format!(
            "unsupported chunks schema_version {} (expected {STORE_SCHEMA_VERSION})",
            persisted_chunks.schema_version
        )));
    }

    let index = persisted_index.index;
    let chunks = persisted_chunks.chunks;

    index.validate()?;
    if index.dimension() != expected_dimension {
        return Err(VectorStoreError::corrupt(format!(
            "persisted dimension {} does not match embedder dimension {expected_dimension}",
            index.dimension()
        )));
    }
    if index.len() != chunks.len() {
        return Err(VectorStoreError::corrupt(format!(
            "index holds {} vectors but chunk store holds {} chunks",
            index.len(),
            chunks.len()
        )));
    }

    Ok((index, chunks))
}

async fn persist_state(dir: &Path, index: &FlatIndex, chunks: &ChunkStore) -> Result<()> {
    log::debug!("Persisting vector store to {}", dir.display());
    tokio::fs::create_dir_all(dir).await?;

    let index_bytes = serde_json::to_vec(&PersistedIndex {
        schema_version: STORE_SCHEMA_VERSION,
        index: index.clone(),
    })?;
    let chunk_bytes = serde_json::to_vec_pretty(&PersistedChunks {
        schema_version: STORE_SCHEMA_VERSION,
        chunks: chunks.clone(),
    })?;

    // Stage both artifacts fully before either rename, so a crash mid-write
    // never leaves a half-written file visible to a concurrent opener.
    let index_file = index_path(dir);
    let chunks_file = chunks_path(dir);
    let index_tmp = index_file.with_extension("json.tmp");
    let chunks_tmp = chunks_file.with_extension("json.tmp");

    tokio::fs::write(&index_tmp, index_bytes).await?;
    tokio::fs::write(&chunks_tmp, chunk_bytes).await?;
    tokio::fs::rename(&index_tmp, &index_file).await?;
    tokio::fs::rename(&chunks_tmp, &chunks_file).await?;

    Ok(())
}

struct StoreWriteLock {
    #[allow(dead_code)]
    file: std::fs::File,
}

impl Drop for StoreWriteLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Advisory exclusive lock held across embed, append, and persist, so
/// processes sharing the store directory never interleave writers.
async fn acquire_write_lock(dir: &Path) -> Result<StoreWriteLock> {
    let path = lock_path(dir);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let lock = spawn_blocking(move || -> Result<StoreWriteLock> {
        use std::fs::OpenOptions;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        FileExt::lock_exclusive(&file)?;

        Ok(StoreWriteLock { file })
    })
    .await
    .map_err(|e| VectorStoreError::IoError(std::io::Error::other(format!("join store lock task: {e}"))))??;

    Ok(lock)
}
