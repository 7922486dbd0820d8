//! HTTP handlers for the album endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::album::{
    CreateAlbumCommand, GetAlbumQuery, ListAlbumsQuery, UpdateAlbumCommand,
};
use crate::domain::foundation::AlbumId;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AlbumListResponse, AlbumResponse, CreateAlbumRequest, PageParams, UpdateAlbumRequest,
};

/// GET /albums/ - List albums visible to the caller, newest first.
pub async fn list_albums(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let albums = state
        .list_albums_handler()
        .handle(ListAlbumsQuery {
            actor: user,
            page: page.into(),
        })
        .await?;

    Ok(Json(AlbumListResponse {
        albums: albums.into_iter().map(AlbumResponse::from).collect(),
    }))
}

/// POST /albums/ - Create an album (members only).
pub async fn create_album(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateAlbumRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let album = state
        .create_album_handler()
        .handle(CreateAlbumCommand {
            actor: user,
            title: request.title,
            theme: request.theme,
            visibility: request.visibility,
            expires_at: request.expires_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AlbumResponse::from(album))))
}

/// GET /albums/:id - Album detail, visibility-checked.
pub async fn get_album(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(album_id): Path<AlbumId>,
) -> Result<impl IntoResponse, ApiError> {
    let album = state
        .get_album_handler()
        .handle(GetAlbumQuery {
            actor: user,
            album_id,
        })
        .await?;

    Ok(Json(AlbumResponse::from(album)))
}

/// PUT /albums/:id - Update an album (owner or admin).
pub async fn update_album(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(album_id): Path<AlbumId>,
    Json(request): Json<UpdateAlbumRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let album = state
        .update_album_handler()
        .handle(UpdateAlbumCommand {
            actor: user,
            album_id,
            changes: request.into(),
        })
        .await?;

    Ok(Json(AlbumResponse::from(album)))
}
