//! CreateAlbumHandler - Command handler for album creation.

use std::sync::Arc;

use crate::domain::album::{Album, AlbumError, AlbumVisibility};
use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::ports::AlbumRepository;

/// Command to create an album.
#[derive(Debug, Clone)]
pub struct CreateAlbumCommand {
    pub actor: AuthenticatedUser,
    pub title: String,
    pub theme: Option<String>,
    pub visibility: AlbumVisibility,
    pub expires_at: Option<Timestamp>,
}

/// Handler for album creation.
pub struct CreateAlbumHandler {
    albums: Arc<dyn AlbumRepository>,
}

impl CreateAlbumHandler {
    pub fn new(albums: Arc<dyn AlbumRepository>) -> Self {
        Self { albums }
    }

    pub async fn handle(&self, cmd: CreateAlbumCommand) -> Result<Album, AlbumError> {
        if !cmd.actor.role.can_create_albums() {
            return Err(AlbumError::forbidden("Only members may create albums"));
        }

        let album = Album::create(
            cmd.actor.id,
            cmd.title,
            cmd.theme,
            cmd.visibility,
            cmd.expires_at,
        )
        .map_err(|e| AlbumError::validation("album", e.to_string()))?;

        self.albums.insert(&album).await?;

        tracing::info!(album_id = %album.id, owner = %album.owner_id, "album created");
        Ok(album)
    }
}
