//! Media-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Forbidden | 403 |
//! | InvalidState | 409 |
//! | AlbumClosed | 400 |
//! | QuotaExceeded | 400 |
//! | ValidationFailed | 400 |
//! | Storage | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, MediaId};

use super::ModerationStatus;

/// Media-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// Media item was not found.
    NotFound(MediaId),

    /// Caller may not see or act on this item.
    Forbidden { reason: String },

    /// Illegal state transition attempted; the item is unchanged.
    InvalidState {
        current: ModerationStatus,
        attempted: &'static str,
    },

    /// Target album has expired or otherwise refuses uploads.
    AlbumClosed { reason: String },

    /// The uploader's active plan limit is exhausted.
    QuotaExceeded { limit: u32 },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Blob store write or read failed; no partial record persisted.
    Storage(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl MediaError {
    pub fn not_found(id: MediaId) -> Self {
        MediaError::NotFound(id)
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        MediaError::Forbidden { reason: reason.into() }
    }

    pub fn invalid_state(current: ModerationStatus, attempted: &'static str) -> Self {
        MediaError::InvalidState { current, attempted }
    }

    pub fn album_closed(reason: impl Into<String>) -> Self {
        MediaError::AlbumClosed { reason: reason.into() }
    }

    pub fn quota_exceeded(limit: u32) -> Self {
        MediaError::QuotaExceeded { limit }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MediaError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        MediaError::Storage(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MediaError::Infrastructure(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            MediaError::NotFound(id) => format!("Media {} not found", id),
            MediaError::Forbidden { reason } => reason.clone(),
            MediaError::InvalidState { current, attempted } => format!(
                "Cannot {} media in state '{}'",
                attempted, current
            ),
            MediaError::AlbumClosed { reason } => reason.clone(),
            MediaError::QuotaExceeded { limit } => {
                format!("Upload quota of {} items reached for the active plan", limit)
            }
            MediaError::ValidationFailed { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            MediaError::Storage(msg) => format!("Storage failure: {}", msg),
            MediaError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for MediaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MediaError {}

impl From<DomainError> for MediaError {
    fn from(err: DomainError) -> Self {
        MediaError::Infrastructure(err.to_string())
    }
}
