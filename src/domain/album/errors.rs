//! Album-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Forbidden | 403 |
//! | Expired | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{AlbumId, DomainError};

/// Album-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumError {
    /// Album was not found.
    NotFound(AlbumId),

    /// Caller may not see or mutate this album.
    Forbidden { reason: String },

    /// Album expiration has passed; no new media accepted.
    Expired(AlbumId),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl AlbumError {
    pub fn not_found(id: AlbumId) -> Self {
        AlbumError::NotFound(id)
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        AlbumError::Forbidden { reason: reason.into() }
    }

    pub fn expired(id: AlbumId) -> Self {
        AlbumError::Expired(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AlbumError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AlbumError::Infrastructure(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            AlbumError::NotFound(id) => format!("Album {} not found", id),
            AlbumError::Forbidden { reason } => reason.clone(),
            AlbumError::Expired(id) => {
                format!("Album {} has expired and no longer accepts uploads", id)
            }
            AlbumError::ValidationFailed { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            AlbumError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AlbumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AlbumError {}

impl From<DomainError> for AlbumError {
    fn from(err: DomainError) -> Self {
        AlbumError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_album() {
        let id = AlbumId::new();
        assert!(AlbumError::not_found(id).message().contains(&id.to_string()));
    }

    #[test]
    fn validation_message_includes_field() {
        let err = AlbumError::validation("title", "cannot be empty");
        assert_eq!(err.message(), "Invalid title: cannot be empty");
    }

    #[test]
    fn domain_error_converts_to_infrastructure() {
        let err: AlbumError =
            DomainError::database("connection reset").into();
        assert!(matches!(err, AlbumError::Infrastructure(_)));
    }
}
