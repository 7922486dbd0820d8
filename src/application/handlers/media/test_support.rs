//! Shared mock repository for media handler tests.
//!
//! The mock enforces the same compare-and-swap contract as the real
//! adapters so concurrency tests exercise genuine conflict paths.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AlbumId, DomainError, ErrorCode, MediaId, Timestamp, UserId};
use crate::domain::media::{MediaItem, ModerationStatus};
use crate::ports::{MediaRepository, MediaStatistics};

pub struct MockMediaRepository {
    items: Mutex<Vec<MediaItem>>,
}

impl MockMediaRepository {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    pub fn with_items(items: Vec<MediaItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    pub fn get(&self, id: &MediaId) -> Option<MediaItem> {
        self.items.lock().unwrap().iter().find(|i| &i.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaRepository for MockMediaRepository {
    async fn insert(&self, item: &MediaItem) -> Result<(), DomainError> {
        self.items.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MediaId) -> Result<Option<MediaItem>, DomainError> {
        Ok(self.get(id))
    }

    async fn update(&self, item: &MediaItem, expected_version: u64) -> Result<(), DomainError> {
        let mut items = self.items.lock().unwrap();
        let Some(slot) = items.iter_mut().find(|i| i.id == item.id) else {
            return Err(DomainError::new(ErrorCode::MediaNotFound, "Media not found"));
        };
        if slot.version != expected_version {
            return Err(DomainError::conflict("media version changed"));
        }
        *slot = item.clone();
        Ok(())
    }

    async fn list_by_album(&self, album_id: &AlbumId) -> Result<Vec<MediaItem>, DomainError> {
        let mut items: Vec<MediaItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| &i.album_id == album_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(items)
    }

    async fn list_flagged(&self) -> Result<Vec<MediaItem>, DomainError> {
        let mut items: Vec<MediaItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.status == ModerationStatus::Flagged)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(items)
    }

    async fn count_active_by_uploader(&self, uploader: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| &i.uploader_id == uploader && i.status != ModerationStatus::Rejected)
            .count() as u64)
    }

    async fn statistics(&self, uploaded_since: Timestamp) -> Result<MediaStatistics, DomainError> {
        let items = self.items.lock().unwrap();
        Ok(MediaStatistics {
            total: items.len() as u64,
            flagged: items
                .iter()
                .filter(|i| i.status == ModerationStatus::Flagged)
                .count() as u64,
            uploaded_since_cutoff: items
                .iter()
                .filter(|i| i.created_at.is_after(&uploaded_since))
                .count() as u64,
        })
    }
}
