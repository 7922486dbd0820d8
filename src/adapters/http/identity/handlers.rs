//! HTTP handlers for the identity endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::identity::{LoginUserCommand, RegisterUserCommand};

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{AuthResponse, LoginRequest, RegisterRequest};

/// POST /users/register - Create an account and issue a bearer token.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state
        .register_handler()
        .handle(RegisterUserCommand {
            display_name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(issued))))
}

/// POST /users/login - Exchange credentials for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state
        .login_handler()
        .handle(LoginUserCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(AuthResponse::from(issued)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::memory_state;
    use crate::domain::foundation::Role;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Alice".to_string(),
            email: email.to_string(),
            password: "correct-horse".to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let state = memory_state();

        register(State(state.clone()), Json(register_request("a@example.com")))
            .await
            .expect("registration succeeds");

        let result = login(
            State(state),
            Json(LoginRequest {
                email: "a@example.com".to_string(),
                password: "correct-horse".to_string(),
            }),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn registered_accounts_are_members() {
        let state = memory_state();
        let issued = state
            .register_handler()
            .handle(RegisterUserCommand {
                display_name: "Alice".to_string(),
                email: "a@example.com".to_string(),
                password: "correct-horse".to_string(),
                phone: None,
            })
            .await
            .unwrap();
        assert_eq!(issued.user.role, Role::Member);
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let state = memory_state();
        let err = login(
            State(state),
            Json(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "whatever-pass".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
