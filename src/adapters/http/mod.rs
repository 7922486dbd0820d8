//! HTTP adapters - the REST surface of the backend.
//!
//! Each domain module carries its own dto/handlers/routes files;
//! [`api_router`] assembles them under the paths the presentation layer
//! consumes and threads the auth middleware over the whole tree. Routes
//! that need a caller enforce it with the [`RequireAuth`] extractor, so
//! open endpoints (register, login, health) share the same router.

pub mod admin;
pub mod album;
pub mod error;
pub mod identity;
pub mod media;
pub mod middleware;
pub mod payment;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::{routing::get, Router};

use middleware::auth_middleware;

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// Assemble the full API router.
///
/// # Mounts
/// - `/users` - register, login
/// - `/albums` - create, list, detail, update
/// - `/media` - upload, per-album listing, reporting, review queue
/// - `/payments` - create-order, verify-payment
/// - `/admin` - dashboard, approve, reject
/// - `/health` - liveness, unauthenticated
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/users", identity::identity_router())
        .nest("/albums", album::album_router())
        .nest("/media", media::media_router())
        .nest("/payments", payment::payment_router())
        .nest("/admin", admin::admin_router())
        .route("/health", get(health))
        .layer(axum::middleware::from_fn_with_state(
            state.identity_gate.clone(),
            auth_middleware,
        ))
        .with_state(state)
}
