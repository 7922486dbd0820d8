//! Axum router for the admin endpoints.

use axum::{
    routing::{delete, get, patch},
    Router,
};

use super::super::state::AppState;
use super::handlers::{approve_media, dashboard, reject_media};

/// Create the admin router, mounted at `/admin`.
///
/// # Routes
/// - `GET /dashboard` - aggregate stats
/// - `PATCH /approve-media/:id` - approve a pending or flagged item
/// - `DELETE /reject-media/:id` - reject an item (record retained)
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/approve-media/:id", patch(approve_media))
        .route("/reject-media/:id", delete(reject_media))
}
