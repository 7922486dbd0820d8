//! HTTP DTOs for the album endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::album::{Album, AlbumChanges, AlbumVisibility};
use crate::domain::foundation::{MediaId, Timestamp};
use crate::ports::Page;

/// Request to create an album.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlbumRequest {
    pub title: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default = "default_visibility")]
    pub visibility: AlbumVisibility,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

fn default_visibility() -> AlbumVisibility {
    AlbumVisibility::Public
}

/// Request to update an album; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAlbumRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub visibility: Option<AlbumVisibility>,
    #[serde(default)]
    pub cover_media: Option<MediaId>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl From<UpdateAlbumRequest> for AlbumChanges {
    fn from(request: UpdateAlbumRequest) -> Self {
        AlbumChanges {
            title: request.title,
            theme: request.theme.map(Some),
            visibility: request.visibility,
            cover_media: request.cover_media.map(Some),
            expires_at: request.expires_at.map(Some),
        }
    }
}

/// Paging query parameters for the album listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Page::new(params.offset, params.limit.unwrap_or(Page::DEFAULT_LIMIT))
    }
}

/// An album as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub theme: Option<String>,
    pub visibility: AlbumVisibility,
    pub cover_media: Option<String>,
    pub expires_at: Option<String>,
    pub created_at: String,
    /// Derived from the expiration policy, so clients never re-derive it.
    pub accepting_uploads: bool,
}

impl From<Album> for AlbumResponse {
    fn from(album: Album) -> Self {
        Self {
            accepting_uploads: album.is_accepting_uploads(),
            id: album.id.to_string(),
            owner_id: album.owner_id.to_string(),
            title: album.title,
            theme: album.theme,
            visibility: album.visibility,
            cover_media: album.cover_media.map(|m| m.to_string()),
            expires_at: album.expires_at.map(|t| t.to_rfc3339()),
            created_at: album.created_at.to_rfc3339(),
        }
    }
}

/// Response for the album listing.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumListResponse {
    pub albums: Vec<AlbumResponse>,
}
