//! Identity gate port - bearer token resolution.
//!
//! The identity gate is the leaf dependency of every other component: it
//! turns an opaque bearer token into an [`AuthenticatedUser`] carrying the
//! caller's role. Token format and issuance mechanics are adapter concerns.
//!
//! [`AuthenticatedUser`]: crate::domain::foundation::AuthenticatedUser

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Resolves bearer tokens to authenticated callers.
///
/// # Contract
///
/// Implementations must:
/// - Return the caller with their **current** role (role changes take
///   effect on the next request, not the next token)
/// - Return `AuthError::InvalidToken`/`TokenExpired` for bad tokens
/// - Return `AuthError::UserNotFound` when the subject no longer exists
#[async_trait]
pub trait IdentityGate: Send + Sync {
    /// Resolve a bearer token to an authenticated caller.
    async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Issues bearer tokens for authenticated callers.
///
/// Separate from [`IdentityGate`] so request handling only ever depends on
/// resolution; issuance is needed solely by the register/login surface.
pub trait TokenIssuer: Send + Sync {
    /// Issue a bearer token for the given caller.
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn identity_gate_is_object_safe() {
        fn _accepts_dyn(_gate: &dyn IdentityGate) {}
        fn _accepts_issuer(_issuer: &dyn TokenIssuer) {}
    }
}
