//! # Recall Vector Store
//!
//! Chunked vector index for retrieval-augmented knowledge bases: embedding
//! storage, similarity search, source-scoped filtering, and on-disk
//! persistence.
//!
//! ## Architecture
//!
//! ```text
//! ingest(texts, source_id)
//!     │
//!     ├──> Embedder (batched, one call per ingest)
//!     │      └─> normalized Vector[384]
//!     │
//!     ├──> FlatIndex   ──┐ positionally aligned: chunk i owns vector i
//!     ├──> ChunkStore  ──┘
//!     │
//!     └──> Persistence (index.json + chunks.json, atomic replace)
//!
//! query(text, top_k, allowed_sources)
//!     │
//!     ├──> Embedder ─> FlatIndex.search(max(top_k, 10))
//!     ├──> ChunkStore lookup ─> source filter (order-preserving)
//!     └──> first top_k survivors, similarity-ranked
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use recall_vector_store::{HashedEmbedder, VectorStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let embedder = Arc::new(HashedEmbedder::default());
//!     let mut store = VectorStore::open("./store", embedder).await?;
//!
//!     store
//!         .ingest(vec!["The cat sat on the mat.".to_string()], "s1")
//!         .await?;
//!
//!     let results = store.query("Where did the cat sit?", 3, None).await?;
//!     for result in results {
//!         println!("{:.3}: {}", result.score, result.chunk.text);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod chunk_store;
mod embeddings;
mod error;
mod flat_index;
mod paths;
mod store;
mod types;

pub use chunk_store::ChunkStore;
pub use embeddings::{l2_normalize, Embedder, FastEmbedder, HashedEmbedder, DEFAULT_DIMENSION};
pub use error::{Result, VectorStoreError};
pub use flat_index::FlatIndex;
pub use paths::{chunks_path, index_path, lock_path, CHUNKS_FILE_NAME, INDEX_FILE_NAME};
pub use store::{StoreConfig, VectorStore, MIN_CANDIDATE_FETCH, STORE_SCHEMA_VERSION};
pub use types::{Chunk, SearchResult};
