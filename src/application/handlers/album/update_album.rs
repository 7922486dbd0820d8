//! UpdateAlbumHandler - Command handler for owner/admin album edits.

use std::sync::Arc;

use crate::domain::album::{Album, AlbumChanges, AlbumError};
use crate::domain::foundation::{AlbumId, AuthenticatedUser};
use crate::ports::AlbumRepository;

/// Command to update an album.
#[derive(Debug, Clone)]
pub struct UpdateAlbumCommand {
    pub actor: AuthenticatedUser,
    pub album_id: AlbumId,
    pub changes: AlbumChanges,
}

/// Handler for album updates.
pub struct UpdateAlbumHandler {
    albums: Arc<dyn AlbumRepository>,
}

impl UpdateAlbumHandler {
    pub fn new(albums: Arc<dyn AlbumRepository>) -> Self {
        Self { albums }
    }

    pub async fn handle(&self, cmd: UpdateAlbumCommand) -> Result<Album, AlbumError> {
        let mut album = self
            .albums
            .find_by_id(&cmd.album_id)
            .await?
            .ok_or(AlbumError::NotFound(cmd.album_id))?;

        if !album.editable_by(&cmd.actor) {
            return Err(AlbumError::forbidden("Only the owner or an admin may edit an album"));
        }

        album
            .apply(cmd.changes)
            .map_err(|e| AlbumError::validation("album", e.to_string()))?;

        self.albums.update(&album).await?;
        Ok(album)
    }
}
