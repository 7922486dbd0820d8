//! Account registry port - account storage behind the identity surface.
//!
//! Registration and login need somewhere to keep accounts and credential
//! digests; everything else only ever sees [`AuthenticatedUser`] values
//! resolved by the identity gate.
//!
//! [`AuthenticatedUser`]: crate::domain::foundation::AuthenticatedUser

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Role, Timestamp, UserId};

/// A stored account.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    /// Salted credential digest; never the raw password.
    pub password_digest: String,
    pub created_at: Timestamp,
}

/// Input for account creation.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub display_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub password_digest: String,
}

/// Repository port for account storage.
///
/// # Contract
///
/// - Email is unique; `create` fails with `AccountExists` on duplicates
/// - Lookups by id back token resolution and must reflect role changes
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// - `AccountExists` if the email is already registered
    /// - `ServiceUnavailable` on storage failure
    async fn create(&self, account: NewAccount) -> Result<UserAccount, AuthError>;

    /// Find an account by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, AuthError>;

    /// Find an account by email. Returns `None` if absent.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthError>;

    /// Total registered accounts, for the admin dashboard.
    async fn count(&self) -> Result<u64, AuthError>;
}

impl UserAccount {
    /// Projects the stored account into an authenticated caller.
    pub fn to_authenticated(&self) -> crate::domain::foundation::AuthenticatedUser {
        crate::domain::foundation::AuthenticatedUser::new(
            self.id,
            self.email.clone(),
            self.display_name.clone(),
            self.role,
        )
    }
}
