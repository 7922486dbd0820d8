//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller resolved from a bearer
//! token. They have **no external dependencies** - any token scheme can
//! populate them via the `IdentityGate` port.

use super::{Role, UserId};
use thiserror::Error;

/// Authenticated caller resolved from a validated bearer token.
///
/// This is a **domain type** with no provider dependencies. The identity
/// adapter populates it; everything downstream consumes it by value.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Display name shown next to uploads and albums.
    pub display_name: String,

    /// The caller's platform role.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Central capability query: does the caller hold the given role?
    ///
    /// Admin satisfies every role check.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role || self.role.is_admin()
    }

    /// Returns true if the caller holds moderation privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authentication errors that can occur during token resolution.
///
/// These errors are **domain-centric** - they describe what went wrong
/// from the application's perspective, not the token library's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists in the system.
    #[error("User not found")]
    UserNotFound,

    /// The supplied credentials do not match any account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("Account already exists")]
    AccountExists,

    /// The identity backend is unavailable (network, config, etc.).
    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the caller should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}
