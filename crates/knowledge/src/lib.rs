//! # Recall Knowledge
//!
//! Session layer over the chunked vector index: document ingestion with
//! per-source bookkeeping, and question answering scoped to the sources the
//! caller has enabled.
//!
//! ## Example
//!
//! ```no_run
//! use recall_knowledge::KnowledgeBase;
//! use recall_vector_store::HashedEmbedder;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut base = KnowledgeBase::open("./kb", Arc::new(HashedEmbedder::default())).await?;
//!
//!     base.add_document("notes.txt", "The cat sat on the mat.").await?;
//!
//!     for result in base.ask("Where did the cat sit?", 3).await? {
//!         println!("{:.3}: {}", result.score, result.chunk.text);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod base;
mod error;
mod sources;

pub use base::KnowledgeBase;
pub use error::{KnowledgeError, Result};
pub use sources::{SourceEntry, SourceRegistry};

// Re-export the collaborator types callers hold
pub use recall_vector_store::{Embedder, FastEmbedder, HashedEmbedder, SearchResult, StoreConfig};
