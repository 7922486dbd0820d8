//! HTTP DTOs for the media endpoints.

use serde::Serialize;

use crate::domain::media::{MediaItem, MediaKind, ModerationStatus};

/// A media item as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub id: String,
    pub album_id: String,
    pub uploader_id: String,
    pub kind: MediaKind,
    pub url: String,
    pub caption: Option<String>,
    pub status: ModerationStatus,
    pub report_count: u32,
    pub created_at: String,
}

impl From<MediaItem> for MediaResponse {
    fn from(item: MediaItem) -> Self {
        Self {
            report_count: item.report_count(),
            id: item.id.to_string(),
            album_id: item.album_id.to_string(),
            uploader_id: item.uploader_id.to_string(),
            kind: item.kind,
            url: item.url,
            caption: item.caption,
            status: item.status,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

/// Response for media listings.
#[derive(Debug, Clone, Serialize)]
pub struct MediaListResponse {
    pub media: Vec<MediaResponse>,
}
