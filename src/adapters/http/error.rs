//! API error envelope.
//!
//! Every domain error converges here so the HTTP surface answers with one
//! shape: `{ "detail": <message> }`, plus `"retryable": true` on the one
//! error class a client may safely retry (gateway unavailable, with the
//! same idempotency key).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::album::AlbumError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::domain::media::MediaError;
use crate::domain::payment::PaymentFlowError;

/// Error payload returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub detail: String,

    /// Present (true) only when the caller may retry the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

/// API error carrying the mapped status and envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
    pub retryable: bool,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            retryable: false,
        }
    }

    fn retryable(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            retryable: true,
        }
    }

    /// 400 with a caller-phrased message, for request-shape problems the
    /// domain never sees (missing multipart field, bad header).
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.detail,
            retryable: self.retryable.then_some(true),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AlbumError> for ApiError {
    fn from(err: AlbumError) -> Self {
        let status = match &err {
            AlbumError::NotFound(_) => StatusCode::NOT_FOUND,
            AlbumError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AlbumError::Expired(_) => StatusCode::BAD_REQUEST,
            AlbumError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            AlbumError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.message())
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        let status = match &err {
            MediaError::NotFound(_) => StatusCode::NOT_FOUND,
            MediaError::Forbidden { .. } => StatusCode::FORBIDDEN,
            MediaError::InvalidState { .. } => StatusCode::CONFLICT,
            MediaError::AlbumClosed { .. } => StatusCode::BAD_REQUEST,
            MediaError::QuotaExceeded { .. } => StatusCode::BAD_REQUEST,
            MediaError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            MediaError::Storage(_) => StatusCode::BAD_GATEWAY,
            MediaError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.message())
    }
}

impl From<PaymentFlowError> for ApiError {
    fn from(err: PaymentFlowError) -> Self {
        match &err {
            PaymentFlowError::GatewayUnavailable { .. } => {
                Self::retryable(StatusCode::BAD_GATEWAY, err.message())
            }
            PaymentFlowError::GatewayRejected { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, err.message())
            }
            PaymentFlowError::UnknownPlan(_) => Self::new(StatusCode::BAD_REQUEST, err.message()),
            PaymentFlowError::OrderNotFound(_) => Self::new(StatusCode::NOT_FOUND, err.message()),
            PaymentFlowError::AlreadyFinalized { .. } => {
                Self::new(StatusCode::CONFLICT, err.message())
            }
            PaymentFlowError::SignatureMismatch => {
                Self::new(StatusCode::BAD_REQUEST, err.message())
            }
            PaymentFlowError::ValidationFailed { .. } => {
                Self::new(StatusCode::BAD_REQUEST, err.message())
            }
            PaymentFlowError::Infrastructure(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.message())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountExists => StatusCode::BAD_REQUEST,
            AuthError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self::new(status, err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::AlbumNotFound
            | ErrorCode::MediaNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidStateTransition
            | ErrorCode::ConflictingUpdate
            | ErrorCode::DuplicateOrder => StatusCode::CONFLICT,
            ErrorCode::AlbumExpired | ErrorCode::QuotaExceeded => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::GatewayUnavailable | ErrorCode::StorageFailed => StatusCode::BAD_GATEWAY,
            ErrorCode::SignatureMismatch => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AlbumId, MediaId};
    use crate::domain::media::ModerationStatus;
    use crate::domain::payment::OrderStatus;

    #[test]
    fn album_errors_map_to_spec_statuses() {
        let err: ApiError = AlbumError::not_found(AlbumId::new()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = AlbumError::forbidden("no").into();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let err: ApiError = AlbumError::validation("title", "empty").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_state_is_a_conflict() {
        let err: ApiError =
            MediaError::invalid_state(ModerationStatus::Rejected, "approve").into();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err: ApiError =
            PaymentFlowError::already_finalized(OrderStatus::Verified).into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn storage_failure_is_bad_gateway() {
        let err: ApiError = MediaError::Storage("write interrupted".to_string()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(!err.retryable);
    }

    #[test]
    fn only_gateway_unavailable_carries_the_retry_hint() {
        let err: ApiError = PaymentFlowError::gateway_unavailable("timeout").into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(err.retryable);

        let err: ApiError = PaymentFlowError::SignatureMismatch.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(!err.retryable);
    }

    #[test]
    fn not_found_media_maps_to_404() {
        let err: ApiError = MediaError::not_found(MediaId::new()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_errors_map_to_401_or_400() {
        let err: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err: ApiError = AuthError::AccountExists.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn envelope_omits_retryable_unless_true() {
        let body = ErrorBody {
            detail: "boom".to_string(),
            retryable: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"detail":"boom"}"#);

        let body = ErrorBody {
            detail: "gateway".to_string(),
            retryable: Some(true),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""retryable":true"#));
    }
}
