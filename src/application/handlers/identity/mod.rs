//! Identity issuance handlers (register/login).
//!
//! Everything else in the system consumes bearer tokens through the
//! identity gate; these two handlers are the only writers of accounts.

mod login_user;
mod register_user;

#[cfg(test)]
pub(crate) mod test_support;

pub use login_user::{LoginUserCommand, LoginUserHandler};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};

/// Result of a successful register or login: the caller plus their token.
#[derive(Debug, Clone)]
pub struct IssuedIdentity {
    pub user: crate::domain::foundation::AuthenticatedUser,
    pub token: String,
}
