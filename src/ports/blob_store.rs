//! Blob store port for media bytes.
//!
//! The blob store is an opaque collaborator exposing store/fetch by key.
//! `put` resolves only once the write is complete, so a cancelled upload
//! never yields a media record referencing a partial blob.

use async_trait::async_trait;

/// A successfully stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// The key the blob was stored under.
    pub key: String,

    /// Public URL for serving the blob.
    pub url: String,
}

/// Errors from blob store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobStoreError {
    pub message: String,
}

impl BlobStoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for BlobStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "blob store error: {}", self.message)
    }
}

impl std::error::Error for BlobStoreError {}

/// Port for the blob store collaborator.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob under `key`, returning only after the full write is
    /// confirmed.
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredBlob, BlobStoreError>;

    /// Fetch a blob by key. Returns `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError>;
}
