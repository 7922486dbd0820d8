//! Local filesystem blob store.
//!
//! Stores uploaded media bytes under a base directory, keyed by the
//! storage key the upload handler generates. Writes use a
//! write-to-temp-then-rename pattern so `put` resolves only once the
//! complete blob is durable: a cancelled or crashed upload leaves a stray
//! `.tmp` file at worst, never a readable partial blob.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{BlobStore, BlobStoreError, StoredBlob};

/// Maximum blob size allowed (50 MB).
const MAX_BLOB_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Filesystem-backed blob store.
///
/// # Directory Structure
///
/// Storage keys may contain `/` separators and map directly onto the
/// directory tree:
///
/// ```text
/// {root}/
/// └── albums/
///     ├── 6a1f.../  (album id)
///     │   ├── 91c0....jpg
///     │   └── 91c0....jpg.tmp   (in-flight write)
///     └── 77e2.../
///         └── 03ab....mp4
/// ```
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Base directory for all blobs.
    root: PathBuf,

    /// URL prefix blobs are served under.
    public_base_url: String,
}

impl LocalBlobStore {
    /// Creates a new blob store rooted at `root`, serving blobs under
    /// `public_base_url`.
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.tmp", key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }

    /// Storage keys come from the upload handler, but refuse traversal
    /// segments anyway so a corrupted key cannot escape the root.
    fn validate_key(key: &str) -> Result<(), BlobStoreError> {
        if key.is_empty() {
            return Err(BlobStoreError::new("empty storage key"));
        }
        if Path::new(key)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(BlobStoreError::new(format!("invalid storage key '{}'", key)));
        }
        Ok(())
    }

    async fn ensure_parent_dir(&self, path: &Path) -> Result<(), BlobStoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                BlobStoreError::new(format!(
                    "failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<StoredBlob, BlobStoreError> {
        Self::validate_key(key)?;

        let size = bytes.len() as u64;
        if size > MAX_BLOB_SIZE_BYTES {
            return Err(BlobStoreError::new(format!(
                "blob of {} bytes exceeds the {} byte limit",
                size, MAX_BLOB_SIZE_BYTES
            )));
        }

        let temp_path = self.temp_path(key);
        let final_path = self.blob_path(key);
        self.ensure_parent_dir(&final_path).await?;

        // Write to temp file
        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            BlobStoreError::new(format!(
                "failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(bytes).await.map_err(|e| {
            BlobStoreError::new(format!(
                "failed to write temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        // Sync to disk before the rename makes the blob visible
        file.sync_all().await.map_err(|e| {
            BlobStoreError::new(format!(
                "failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        // Atomic rename
        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            BlobStoreError::new(format!(
                "failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        Ok(StoredBlob {
            key: key.to_string(),
            url: self.public_url(key),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        Self::validate_key(key)?;

        match fs::read(self.blob_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlobStoreError::new(format!("failed to read blob '{}': {}", key, e))),
        }
    }
}
