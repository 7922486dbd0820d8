//! Shared mock repository for album handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::album::Album;
use crate::domain::foundation::{AlbumId, AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::{AlbumRepository, Page};

/// In-memory mock with the same visibility semantics as the real adapters.
pub struct MockAlbumRepository {
    albums: Mutex<Vec<Album>>,
}

impl MockAlbumRepository {
    pub fn new() -> Self {
        Self {
            albums: Mutex::new(Vec::new()),
        }
    }

    pub fn with_albums(albums: Vec<Album>) -> Self {
        Self {
            albums: Mutex::new(albums),
        }
    }

    pub fn contains(&self, id: &AlbumId) -> bool {
        self.albums.lock().unwrap().iter().any(|a| &a.id == id)
    }

    pub fn get(&self, id: &AlbumId) -> Option<Album> {
        self.albums.lock().unwrap().iter().find(|a| &a.id == id).cloned()
    }
}

#[async_trait]
impl AlbumRepository for MockAlbumRepository {
    async fn insert(&self, album: &Album) -> Result<(), DomainError> {
        self.albums.lock().unwrap().push(album.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, DomainError> {
        Ok(self.get(id))
    }

    async fn update(&self, album: &Album) -> Result<(), DomainError> {
        let mut albums = self.albums.lock().unwrap();
        match albums.iter_mut().find(|a| a.id == album.id) {
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
            .iter()
            .filter(|a| a.visible_to(viewer))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
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
