//! Axum router for the identity endpoints.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::{login, register};

/// Create the identity router, mounted at `/users`.
///
/// # Routes
/// - `POST /register` - create an account, returns a bearer token
/// - `POST /login` - exchange credentials for a bearer token
pub fn identity_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
