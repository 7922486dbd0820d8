//! Axum router for the album endpoints.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{create_album, get_album, list_albums, update_album};

/// Create the album router, mounted at `/albums`.
///
/// # Routes
/// - `GET /` - list albums visible to the caller
/// - `POST /` - create an album (member role)
/// - `GET /:id` - album detail, visibility-checked
/// - `PUT /:id` - update an album (owner or admin)
pub fn album_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_albums).post(create_album))
        .route("/:id", get(get_album).put(update_album))
}
