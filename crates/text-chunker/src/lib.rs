//! # Recall Text Chunker
//!
//! Sliding-window text chunking for embedding and retrieval.
//!
//! ## Philosophy
//!
//! The chunker is purely positional: it slides a fixed-size window over the
//! input with a stride smaller than the window, so consecutive chunks overlap.
//! The overlap protects against a retrieval-relevant sentence being split
//! exactly at a chunk boundary. There is no sentence or paragraph awareness;
//! semantic segmentation is deliberately out of scope.
//!
//! ## Example
//!
//! ```rust
//! use recall_text_chunker::{Chunker, ChunkerConfig};
//!
//! let chunker = Chunker::new(ChunkerConfig { window: 8, stride: 6 }).unwrap();
//! let chunks: Vec<&str> = chunker.windows("the cat sat on the mat").collect();
//! assert_eq!(chunks[0], "the cat ");
//! assert!(chunks.len() > 1);
//! ```

mod clean;
mod config;
mod error;
mod window;

pub use clean::clean_text;
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use window::{Chunker, Windows};
