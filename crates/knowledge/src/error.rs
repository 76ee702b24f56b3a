use thiserror::Error;

pub type Result<T> = std::result::Result<T, KnowledgeError>;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Chunker error: {0}")]
    ChunkerError(#[from] recall_text_chunker::ChunkerError),

    #[error("Vector store error: {0}")]
    VectorStoreError(#[from] recall_vector_store::VectorStoreError),

    #[error("Unknown source: {0}")]
    UnknownSource(String),
}
