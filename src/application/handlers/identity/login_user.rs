//! LoginUserHandler - Command handler for credential login.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, PasswordDigest};
use crate::ports::{AccountRegistry, TokenIssuer};

use super::IssuedIdentity;

/// Command to log in with email + password.
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

/// Handler for login.
pub struct LoginUserHandler {
    accounts: Arc<dyn AccountRegistry>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginUserHandler {
    pub fn new(accounts: Arc<dyn AccountRegistry>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { accounts, tokens }
    }

    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<IssuedIdentity, AuthError> {
        // One error for both unknown email and wrong password so login
        // cannot be used to probe for registered addresses.
        let account = self
            .accounts
            .find_by_email(&cmd.email.trim().to_lowercase())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordDigest::from_stored(&account.password_digest).verify(&cmd.password) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = account.to_authenticated();
        let token = self.tokens.issue(&user)?;
        Ok(IssuedIdentity { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::identity::test_support::{FixedIssuer, MockAccounts};
    use crate::application::handlers::identity::{RegisterUserCommand, RegisterUserHandler};

    async fn registered_accounts() -> Arc<MockAccounts> {
        let accounts = Arc::new(MockAccounts::new());
        RegisterUserHandler::new(accounts.clone(), Arc::new(FixedIssuer))
            .handle(RegisterUserCommand {
                display_name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "correct-horse".to_string(),
                phone: None,
            })
            .await
            .unwrap();
        accounts
    }

    #[tokio::test]
    async fn valid_credentials_issue_a_token() {
        let accounts = registered_accounts().await;
        let handler = LoginUserHandler::new(accounts, Arc::new(FixedIssuer));

        let issued = handler
            .handle(LoginUserCommand {
                email: "Alice@Example.com".to_string(),
                password: "correct-horse".to_string(),
            })
            .await
            .unwrap();
        assert!(!issued.token.is_empty());
        assert_eq!(issued.user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let accounts = registered_accounts().await;
        let handler = LoginUserHandler::new(accounts, Arc::new(FixedIssuer));

        let err = handler
            .handle(LoginUserCommand {
                email: "alice@example.com".to_string(),
                password: "battery-staple".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_indistinguishable_from_wrong_password() {
        let handler = LoginUserHandler::new(Arc::new(MockAccounts::new()), Arc::new(FixedIssuer));

        let err = handler
            .handle(LoginUserCommand {
                email: "ghost@example.com".to_string(),
                password: "whatever-password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
