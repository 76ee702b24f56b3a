use crate::error::Result;
use crate::sources::{SourceEntry, SourceRegistry};
use recall_text_chunker::{clean_text, Chunker, ChunkerConfig};
use recall_vector_store::{Embedder, SearchResult, StoreConfig, VectorStore};
use std::path::Path;
use std::sync::Arc;

/// Knowledge base facade: cleans and chunks incoming documents, tracks their
/// sources, and answers questions against the enabled subset.
///
/// Upstream loaders (file, URL, transcript) hand this type `(display name,
/// raw text)` pairs; downstream callers get similarity-ranked chunks back.
pub struct KnowledgeBase {
    store: VectorStore,
    chunker: Chunker,
    registry: SourceRegistry,
}

impl KnowledgeBase {
    /// Open a knowledge base persisted under `dir`
    pub async fn open(dir: impl AsRef<Path>, embedder: Arc<dyn Embedder>) -> Result<Self> {
        Self::open_with_config(dir, embedder, StoreConfig::default()).await
    }

    pub async fn open_with_config(
        dir: impl AsRef<Path>,
        embedder: Arc<dyn Embedder>,
        config: StoreConfig,
    ) -> Result<Self> {
        let store = VectorStore::open_with_config(dir, embedder, config).await?;
        let chunker = Chunker::new(ChunkerConfig::default())?;
        Ok(Self {
            store,
            chunker,
            registry: SourceRegistry::new(),
        })
    }

    /// Ingest one document: clean, chunk, register a source, embed and
    /// persist.
    ///
    /// Returns the generated source id, or `None` when the document contains
    /// nothing to ingest after cleanup (no registry entry is created).
    pub async fn add_document(
        &mut self,
        name: impl Into<String>,
        raw_text: &str,
    ) -> Result<Option<String>> {
        let name = name.into();
        let cleaned = clean_text(raw_text);
        if cleaned.is_empty() {
            log::warn!("Document '{name}' has no content after cleanup, skipping");
            return Ok(None);
        }

        let chunks = self.chunker.chunk_str(&cleaned);
        let source_id = self.registry.add(&name);
        log::info!(
            "Adding document '{name}' as source {source_id} ({} chunks)",
            chunks.len()
        );

        self.store.ingest(chunks, &source_id).await?;
        Ok(Some(source_id))
    }

    /// Query the enabled sources for the `top_k` most relevant chunks.
    ///
    /// The enabled set is always passed explicitly to the store; with every
    /// source disabled the result is empty.
    pub async fn ask(&self, question: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        let enabled = self.registry.enabled_ids();
        let results = self.store.query(question, top_k, Some(&enabled)).await?;
        Ok(results)
    }

    /// Enable or disable a source for future queries
    pub fn set_source_enabled(&mut self, source_id: &str, enabled: bool) -> Result<()> {
        self.registry.set_enabled(source_id, enabled)
    }

    /// Registered sources, in ingestion order
    pub fn sources(&self) -> impl Iterator<Item = &SourceEntry> {
        self.registry.iter()
    }

    /// Total number of ingested chunks
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.store.len()
    }
}
