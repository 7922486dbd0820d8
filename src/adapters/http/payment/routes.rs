//! Axum router for the payment endpoints.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::{create_order, verify_payment};

/// Create the payment router, mounted at `/payments`.
///
/// # Routes
/// - `POST /create-order` - start a purchase (requires `Idempotency-Key`)
/// - `POST /verify-payment` - complete a purchase from the signed callback
pub fn payment_router() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
}
