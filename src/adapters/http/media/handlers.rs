//! HTTP handlers for the media endpoints.

use std::str::FromStr;

use axum::extract::{Json, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::media::{
    ListAlbumMediaQuery, ListFlaggedMediaQuery, ReportMediaCommand, UploadMediaCommand,
};
use crate::domain::foundation::{AlbumId, MediaId};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{MediaListResponse, MediaResponse};

/// POST /media/upload/ - Multipart upload: `file`, `album_id`, `caption`.
///
/// The multipart body is drained fully before any policy check or blob
/// write; a client that aborts mid-transfer fails here and leaves no
/// record behind.
pub async fn upload_media(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut album_id: Option<AlbumId> = None;
    let mut caption: Option<String> = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("album_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("unreadable album_id: {}", e)))?;
                album_id = Some(
                    AlbumId::from_str(text.trim())
                        .map_err(|_| ApiError::bad_request("album_id is not a valid id"))?,
                );
            }
            Some("caption") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("unreadable caption: {}", e)))?;
                if !text.trim().is_empty() {
                    caption = Some(text);
                }
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload.bin")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("upload interrupted: {}", e)))?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let album_id = album_id.ok_or_else(|| ApiError::bad_request("album_id field is required"))?;
    let (filename, content_type, bytes) =
        file.ok_or_else(|| ApiError::bad_request("file field is required"))?;

    let item = state
        .upload_media_handler()
        .handle(UploadMediaCommand {
            actor: user,
            album_id,
            filename,
            content_type,
            bytes,
            caption,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MediaResponse::from(item))))
}

/// GET /media/album/:id - List an album's media visible to the caller.
pub async fn list_album_media(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(album_id): Path<AlbumId>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state
        .list_album_media_handler()
        .handle(ListAlbumMediaQuery {
            actor: user,
            album_id,
        })
        .await?;

    Ok(Json(MediaListResponse {
        media: items.into_iter().map(MediaResponse::from).collect(),
    }))
}

/// POST /media/report/:id - Report a media item (idempotent per reporter).
pub async fn report_media(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(media_id): Path<MediaId>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .report_media_handler()
        .handle(ReportMediaCommand {
            actor: user,
            media_id,
        })
        .await?;

    Ok(Json(MediaResponse::from(item)))
}

/// GET /media/flagged - The moderation review queue, oldest first.
pub async fn list_flagged(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let items = state
        .list_flagged_handler()
        .handle(ListFlaggedMediaQuery { actor: user })
        .await?;

    Ok(Json(MediaListResponse {
        media: items.into_iter().map(MediaResponse::from).collect(),
    }))
}
