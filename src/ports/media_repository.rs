//! Media repository port.
//!
//! Moderation-state writes go through a compare-and-swap keyed on the
//! aggregate's version so concurrent transitions on one item serialize;
//! transitions on different items proceed in parallel.

use async_trait::async_trait;

use crate::domain::foundation::{AlbumId, DomainError, MediaId, Timestamp, UserId};
use crate::domain::media::MediaItem;

/// Read-only aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaStatistics {
    pub total: u64,
    pub flagged: u64,
    pub uploaded_since_cutoff: u64,
}

/// Repository port for media persistence.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Persist a newly uploaded item.
    ///
    /// Callers only invoke this after the blob store has confirmed the
    /// complete write; a failed upload never reaches the repository.
    async fn insert(&self, item: &MediaItem) -> Result<(), DomainError>;

    /// Find an item by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &MediaId) -> Result<Option<MediaItem>, DomainError>;

    /// Persist a mutated aggregate, compare-and-swap style.
    ///
    /// `expected_version` is the version the caller loaded (the aggregate's
    /// own `version` is already incremented). The write succeeds only if
    /// the stored version still equals `expected_version`.
    ///
    /// # Errors
    ///
    /// - `ConflictingUpdate` if another writer won the race
    /// - `MediaNotFound` if the item does not exist
    async fn update(&self, item: &MediaItem, expected_version: u64) -> Result<(), DomainError>;

    /// All items of an album, oldest first. Visibility filtering is the
    /// caller's concern (it needs the requester).
    async fn list_by_album(&self, album_id: &AlbumId) -> Result<Vec<MediaItem>, DomainError>;

    /// All currently flagged items, oldest first (FIFO review order).
    async fn list_flagged(&self) -> Result<Vec<MediaItem>, DomainError>;

    /// Count of non-rejected items uploaded by the user; backs quota checks.
    async fn count_active_by_uploader(&self, uploader: &UserId) -> Result<u64, DomainError>;

    /// Dashboard aggregates: totals plus uploads since the cutoff.
    async fn statistics(&self, uploaded_since: Timestamp) -> Result<MediaStatistics, DomainError>;
}
