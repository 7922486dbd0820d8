//! In-memory implementation of MediaRepository.
//!
//! The version check and the write happen inside one mutex scope, which is
//! what makes the compare-and-swap linearizable here.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AlbumId, DomainError, ErrorCode, MediaId, Timestamp, UserId};
use crate::domain::media::{MediaItem, ModerationStatus};
use crate::ports::{MediaRepository, MediaStatistics};

/// Media items in a mutex-scoped map.
#[derive(Default)]
pub struct InMemoryMediaRepository {
    items: Mutex<HashMap<MediaId, MediaItem>>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn insert(&self, item: &MediaItem) -> Result<(), DomainError> {
        self.items.lock().unwrap().insert(item.id, item.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &MediaId) -> Result<Option<MediaItem>, DomainError> {
        Ok(self.items.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, item: &MediaItem, expected_version: u64) -> Result<(), DomainError> {
        let mut items = self.items.lock().unwrap();
        let Some(slot) = items.get_mut(&item.id) else {
            return Err(DomainError::new(ErrorCode::MediaNotFound, "Media not found"));
        };
        if slot.version != expected_version {
            return Err(DomainError::conflict(format!(
                "media {} version {} != expected {}",
                item.id, slot.version, expected_version
            )));
        }
        *slot = item.clone();
        Ok(())
    }

    async fn list_by_album(&self, album_id: &AlbumId) -> Result<Vec<MediaItem>, DomainError> {
        let mut items: Vec<MediaItem> = self
            .items
            .lock()
            .unwrap()
            .values()
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
            .values()
            .filter(|i| i.status == ModerationStatus::Flagged)
            .cloned()
            .collect();
        // FIFO review order.
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(items)
    }

    async fn count_active_by_uploader(&self, uploader: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|i| &i.uploader_id == uploader && i.status != ModerationStatus::Rejected)
            .count() as u64)
    }

    async fn statistics(&self, uploaded_since: Timestamp) -> Result<MediaStatistics, DomainError> {
        let items = self.items.lock().unwrap();
        Ok(MediaStatistics {
            total: items.len() as u64,
            flagged: items
                .values()
                .filter(|i| i.status == ModerationStatus::Flagged)
                .count() as u64,
            uploaded_since_cutoff: items
                .values()
                .filter(|i| i.created_at.is_after(&uploaded_since))
                .count() as u64,
        })
    }
}
