//! UploadMediaHandler - Command handler for contributor uploads.
//!
//! Policy checks (album open, quota) run before any blob write; the media
//! record is inserted only after the blob store confirms the complete
//! write, so a cancelled or failed upload leaves nothing behind.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::handlers::entitlement::EntitlementLedger;
use crate::domain::foundation::{AlbumId, AuthenticatedUser};
use crate::domain::media::{MediaError, MediaItem, MediaKind};
use crate::ports::{AlbumRepository, BlobStore, MediaRepository, ScreeningHook};

/// Command to upload a media file into an album.
#[derive(Debug, Clone)]
pub struct UploadMediaCommand {
    pub actor: AuthenticatedUser,
    pub album_id: AlbumId,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub caption: Option<String>,
}

/// Handler for media uploads.
pub struct UploadMediaHandler {
    albums: Arc<dyn AlbumRepository>,
    media: Arc<dyn MediaRepository>,
    blobs: Arc<dyn BlobStore>,
    screening: Arc<dyn ScreeningHook>,
    ledger: Arc<EntitlementLedger>,
}

impl UploadMediaHandler {
    pub fn new(
        albums: Arc<dyn AlbumRepository>,
        media: Arc<dyn MediaRepository>,
        blobs: Arc<dyn BlobStore>,
        screening: Arc<dyn ScreeningHook>,
        ledger: Arc<EntitlementLedger>,
    ) -> Self {
        Self {
            albums,
            media,
            blobs,
            screening,
            ledger,
        }
    }

    pub async fn handle(&self, cmd: UploadMediaCommand) -> Result<MediaItem, MediaError> {
        if cmd.bytes.is_empty() {
            return Err(MediaError::validation("file", "file is empty"));
        }

        // 1. Album must exist, be visible to the uploader, and still accept
        //    uploads.
        let album = self
            .albums
            .find_by_id(&cmd.album_id)
            .await
            .map_err(|e| MediaError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                MediaError::validation("album_id", format!("album {} not found", cmd.album_id))
            })?;

        if !album.visible_to(&cmd.actor) {
            return Err(MediaError::forbidden("You may not upload to this album"));
        }
        if !album.is_accepting_uploads() {
            return Err(MediaError::album_closed(format!(
                "Album {} has expired and no longer accepts uploads",
                album.id
            )));
        }

        // 2. Quota check against the uploader's active plan.
        if !self
            .ledger
            .check_upload_quota(&cmd.actor.id)
            .await
            .map_err(|e| MediaError::infrastructure(e.to_string()))?
        {
            let limit = self
                .ledger
                .upload_limit(&cmd.actor.id)
                .await
                .map_err(|e| MediaError::infrastructure(e.to_string()))?
                .unwrap_or(u32::MAX);
            return Err(MediaError::quota_exceeded(limit));
        }

        // 3. Automated screening (images only; advisory and fail-open).
        let kind = MediaKind::from_content_type(&cmd.content_type);
        let screened_unsafe = match kind {
            MediaKind::Image => {
                let verdict = self.screening.assess(&cmd.bytes, &cmd.content_type).await;
                verdict.is_unsafe()
            }
            MediaKind::Video => false,
        };

        // 4. Blob write; the record exists only after this confirms.
        let key = storage_key(&cmd.album_id, &cmd.filename);
        let blob = self
            .blobs
            .put(&key, &cmd.bytes, &cmd.content_type)
            .await
            .map_err(|e| MediaError::storage(e.to_string()))?;

        // 5. Persist the record.
        let item = MediaItem::upload(
            cmd.album_id,
            cmd.actor.id,
            kind,
            blob.key,
            blob.url,
            cmd.caption,
            screened_unsafe,
        );
        self.media.insert(&item).await?;

        tracing::info!(
            media_id = %item.id,
            album_id = %item.album_id,
            status = %item.status,
            "media uploaded"
        );
        Ok(item)
    }
}

/// Builds a unique blob key under the album, keeping the file extension.
fn storage_key(album_id: &AlbumId, filename: &str) -> String {
    let extension = filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("bin");
    format!("albums/{}/{}.{}", album_id, Uuid::new_v4(), extension)
}
