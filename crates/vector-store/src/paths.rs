use std::path::{Path, PathBuf};

pub const INDEX_FILE_NAME: &str = "index.json";
pub const CHUNKS_FILE_NAME: &str = "chunks.json";
pub const LOCK_FILE_NAME: &str = "store.lock";

#[must_use]
pub fn index_path(store_dir: &Path) -> PathBuf {
    store_dir.join(INDEX_FILE_NAME)
}

#[must_use]
pub fn chunks_path(store_dir: &Path) -> PathBuf {
    store_dir.join(CHUNKS_FILE_NAME)
}

#[must_use]
pub fn lock_path(store_dir: &Path) -> PathBuf {
    store_dir.join(LOCK_FILE_NAME)
}
