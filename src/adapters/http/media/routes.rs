//! Axum router for the media endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{list_album_media, list_flagged, report_media, upload_media};

/// Create the media router, mounted at `/media`.
///
/// # Routes
/// - `POST /upload/` - multipart upload (file, album_id, caption)
/// - `GET /album/:id` - list an album's media, visibility-filtered
/// - `POST /report/:id` - report an item, idempotent per reporter
/// - `GET /flagged` - moderation review queue (admin)
pub fn media_router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_media))
        .route("/upload/", post(upload_media))
        .route("/album/:id", get(list_album_media))
        .route("/report/:id", post(report_media))
        .route("/flagged", get(list_flagged))
}
