//! In-memory implementation of AccountRegistry.
//!
//! Supports optional admin seeding at startup so a fresh deployment has a
//! moderator without manual database surgery.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, PasswordDigest, Role, Timestamp, UserId};
use crate::ports::{AccountRegistry, NewAccount, UserAccount};

/// Accounts in a mutex-scoped list, keyed by unique email.
#[derive(Default)]
pub struct InMemoryAccountRegistry {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryAccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an admin account, skipping the registration role policy.
    pub fn with_admin(self, email: &str, password: &str) -> Self {
        self.accounts.lock().unwrap().push(UserAccount {
            id: UserId::new(),
            display_name: "Administrator".to_string(),
            email: email.to_lowercase(),
            phone: None,
            role: Role::Admin,
            password_digest: PasswordDigest::create(password).as_str().to_string(),
            created_at: Timestamp::now(),
        });
        self
    }
}

#[async_trait]
impl AccountRegistry for InMemoryAccountRegistry {
    async fn create(&self, account: NewAccount) -> Result<UserAccount, AuthError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AuthError::AccountExists);
        }
        let stored = UserAccount {
            id: UserId::new(),
            display_name: account.display_name,
            email: account.email,
            phone: account.phone,
            role: account.role,
            password_digest: account.password_digest,
            created_at: Timestamp::now(),
        };
        accounts.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, AuthError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn count(&self) -> Result<u64, AuthError> {
        Ok(self.accounts.lock().unwrap().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            display_name: "Alice".to_string(),
            email: email.to_string(),
            phone: None,
            role: Role::Member,
            password_digest: PasswordDigest::create("correct-horse").as_str().to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_lookup_by_id_and_email() {
        let registry = InMemoryAccountRegistry::new();
        let created = registry.create(new_account("alice@example.com")).await.unwrap();

        assert!(registry.find_by_id(&created.id).await.unwrap().is_some());
        assert!(registry
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .is_some());
        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let registry = InMemoryAccountRegistry::new();
        registry.create(new_account("alice@example.com")).await.unwrap();

        let err = registry.create(new_account("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::AccountExists));
    }

    #[tokio::test]
    async fn seeded_admin_holds_the_admin_role() {
        let registry = InMemoryAccountRegistry::new().with_admin("root@example.com", "s3cret-pw");

        let admin = registry
            .find_by_email("root@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(PasswordDigest::from_stored(&admin.password_digest).verify("s3cret-pw"));
    }
}
