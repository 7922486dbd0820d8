//! Authentication middleware and extractors for axum.
//!
//! The middleware resolves `Authorization: Bearer <token>` headers through
//! the [`IdentityGate`] port and injects the resulting
//! [`AuthenticatedUser`] into request extensions; handlers pull it back
//! out with the [`RequireAuth`] extractor. A missing token passes through
//! untouched so open routes (register, login, health) share the same
//! router; an invalid token is rejected here.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads it
//! ```
//!
//! [`IdentityGate`]: crate::ports::IdentityGate
//! [`AuthenticatedUser`]: crate::domain::foundation::AuthenticatedUser

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::IdentityGate;

/// Auth middleware state - the identity gate port.
pub type AuthState = Arc<dyn IdentityGate>;

/// Authentication middleware that resolves Bearer tokens.
pub async fn auth_middleware(
    State(gate): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match gate.resolve(token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                let (status, detail) = match &e {
                    AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                    AuthError::ServiceUnavailable(msg) => {
                        tracing::error!("Identity gate unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                    _ => (StatusCode::UNAUTHORIZED, "Invalid token"),
                };
                (status, Json(serde_json::json!({ "detail": detail }))).into_response()
            }
        },
        None => {
            // No token - continue; handlers enforce auth via RequireAuth.
            next.run(request).await
        }
    }
}

/// Extractor that requires an authenticated caller.
///
/// Returns 401 when the auth middleware did not inject a user (no token,
/// or the route was mounted without the middleware).
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid bearer token accompanied the request.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let AuthRejection::Unauthenticated = self;
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "detail": "Authentication required" })),
        )
            .into_response()
    }
}
