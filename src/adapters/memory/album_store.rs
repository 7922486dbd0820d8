//! In-memory implementation of AlbumRepository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::album::Album;
use crate::domain::foundation::{AlbumId, AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::{AlbumRepository, Page};

/// Albums in a mutex-scoped map.
#[derive(Default)]
pub struct InMemoryAlbumRepository {
    albums: Mutex<HashMap<AlbumId, Album>>,
}

impl InMemoryAlbumRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlbumRepository for InMemoryAlbumRepository {
    async fn insert(&self, album: &Album) -> Result<(), DomainError> {
        self.albums.lock().unwrap().insert(album.id, album.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, DomainError> {
        Ok(self.albums.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, album: &Album) -> Result<(), DomainError> {
        let mut albums = self.albums.lock().unwrap();
        match albums.get_mut(&album.id) {
            Some(slot) => {
                *slot = album.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::AlbumNotFound, "Album not found")),
        }
    }

    async fn list_visible(
        &self,
        viewer: &AuthenticatedUser,
        page: Page,
    ) -> Result<Vec<Album>, DomainError> {
        let mut visible: Vec<Album> = self
            .albums
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.visible_to(viewer))
            .cloned()
            .collect();
        // Newest first; id as tiebreaker keeps pages stable.
        visible.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.to_string().cmp(&a.id.to_string()))
        });
        Ok(visible
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.albums.lock().unwrap().len() as u64)
    }
}
