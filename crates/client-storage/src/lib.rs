//! Durable storage for the food delivery client.
//!
//! Credentials and the cached session user live behind two seams:
//! - [`KeyValueStorage`]: a flat string store (file backed or in memory)
//! - [`SessionStore`]: the credential capability the API client is handed
//!
//! Call sites outside this crate never read storage keys directly.

mod file;
mod keys;
mod memory;
mod session;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use session::{PersistentSessionStore, SessionStore};
pub use traits::KeyValueStorage;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Encoding(err.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Open the persisted session store backed by a JSON file.
pub fn open_session_store(path: impl Into<std::path::PathBuf>) -> StorageResult<PersistentSessionStore> {
    let storage = FileStorage::open(path)?;
    Ok(PersistentSessionStore::new(Box::new(storage)))
}
