//! Shared mocks for identity handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{AccountRegistry, NewAccount, TokenIssuer, UserAccount};

pub struct MockAccounts {
    accounts: Mutex<Vec<UserAccount>>,
}

impl MockAccounts {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
        }
    }

    pub fn find(&self, email: &str) -> Option<UserAccount> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned()
    }
}

#[async_trait]
impl AccountRegistry for MockAccounts {
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
        Ok(self.find(email))
    }

    async fn count(&self) -> Result<u64, AuthError> {
        Ok(self.accounts.lock().unwrap().len() as u64)
    }
}

/// Issues a constant token; enough for handler wiring tests.
pub struct FixedIssuer;

impl TokenIssuer for FixedIssuer {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        Ok(format!("token-for-{}", user.id))
    }
}
