//! GetAlbumHandler - Query handler for album detail.

use std::sync::Arc;

use crate::domain::album::{Album, AlbumError};
use crate::domain::foundation::{AlbumId, AuthenticatedUser};
use crate::ports::AlbumRepository;

/// Query for a single album.
#[derive(Debug, Clone)]
pub struct GetAlbumQuery {
    pub actor: AuthenticatedUser,
    pub album_id: AlbumId,
}

/// Handler for album detail.
pub struct GetAlbumHandler {
    albums: Arc<dyn AlbumRepository>,
}

impl GetAlbumHandler {
    pub fn new(albums: Arc<dyn AlbumRepository>) -> Self {
        Self { albums }
    }

    pub async fn handle(&self, query: GetAlbumQuery) -> Result<Album, AlbumError> {
        let album = self
            .albums
            .find_by_id(&query.album_id)
            .await?
            .ok_or(AlbumError::NotFound(query.album_id))?;

        if !album.visible_to(&query.actor) {
            return Err(AlbumError::forbidden("You may not view this album"));
        }

        Ok(album)
    }
}
