use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    /// Embedding vector length differs from the index dimension
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Positional lookup outside the current store bounds
    #[error("Index {index} out of range for store of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// The embedder collaborator failed or timed out
    #[error("Embedding error: {0}")]
    EmbeddingFailure(String),

    /// Persisted artifacts missing, mismatched, or unparseable on load
    #[error("Corrupt persisted state: {0}")]
    CorruptState(String),

    /// Caller-supplied argument outside the accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VectorStoreError {
    /// Create an embedding failure error
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::EmbeddingFailure(msg.into())
    }

    /// Create a corrupt state error
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptState(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
