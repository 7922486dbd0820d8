//! HTTP handlers for the payment endpoints.

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::payment::{CreateOrderCommand, VerifyPaymentCommand};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{CreateOrderRequest, EntitlementResponse, OrderResponse, VerifyPaymentRequest};

/// POST /payments/create-order - Start a plan purchase.
///
/// Retried requests must carry the same `Idempotency-Key` header; the
/// pipeline deduplicates on it so a double-clicked purchase button cannot
/// open two orders.
pub async fn create_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let idempotency_key = headers
        .get("Idempotency-Key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request("Idempotency-Key header is required"))?;

    let order = state
        .create_order_handler()
        .handle(CreateOrderCommand {
            actor: user,
            plan_name: request.plan_type,
            idempotency_key,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// POST /payments/verify-payment - Complete a purchase from the gateway's
/// signed callback.
pub async fn verify_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entitlement = state
        .verify_payment_handler()
        .handle(VerifyPaymentCommand {
            actor: user,
            payment_id: request.payment_id,
            order_id: request.order_id,
            signature: request.signature,
        })
        .await?;

    Ok(Json(EntitlementResponse::from(entitlement)))
}
