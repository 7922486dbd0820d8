//! HTTP handlers for the admin endpoints.
//!
//! The role gate lives in the application handlers (every one of them
//! rejects non-admin callers), so these functions only translate between
//! HTTP and commands.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::admin::DashboardQuery;
use crate::application::handlers::media::{ApproveMediaCommand, RejectMediaCommand};
use crate::domain::foundation::MediaId;

use super::super::error::ApiError;
use super::super::media::MediaResponse;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::DashboardResponse;

/// GET /admin/dashboard - Aggregate stats (admin).
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .dashboard_handler()
        .handle(DashboardQuery { actor: user })
        .await?;

    Ok(Json(DashboardResponse::from(summary)))
}

/// PATCH /admin/approve-media/:id - Approve a pending or flagged item.
pub async fn approve_media(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(media_id): Path<MediaId>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .approve_media_handler()
        .handle(ApproveMediaCommand {
            actor: user,
            media_id,
        })
        .await?;

    Ok(Json(MediaResponse::from(item)))
}

/// DELETE /admin/reject-media/:id - Reject an item; the record is
/// retained with terminal state `rejected`, never hard-deleted.
pub async fn reject_media(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(media_id): Path<MediaId>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state
        .reject_media_handler()
        .handle(RejectMediaCommand {
            actor: user,
            media_id,
        })
        .await?;

    Ok(Json(MediaResponse::from(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::adapters::http::state::test_support::memory_state;
    use crate::domain::foundation::{AuthenticatedUser, Role, UserId};

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "mod@example.com", "Mod", Role::Admin)
    }

    fn member() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "m@example.com", "M", Role::Member)
    }

    #[tokio::test]
    async fn dashboard_rejects_non_admins() {
        let state = memory_state();

        let err = dashboard(State(state.clone()), RequireAuth(member()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        assert!(dashboard(State(state), RequireAuth(admin())).await.is_ok());
    }

    #[tokio::test]
    async fn moderation_on_missing_media_is_not_found() {
        let state = memory_state();

        let err = approve_media(State(state.clone()), RequireAuth(admin()), Path(MediaId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = reject_media(State(state), RequireAuth(admin()), Path(MediaId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
