//! RegisterUserHandler - Command handler for account registration.
//!
//! Registration assigns the member role; album creation requires it and
//! admins are only ever seeded or promoted by other admins.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, PasswordDigest, Role};
use crate::ports::{AccountRegistry, NewAccount, TokenIssuer};

use super::IssuedIdentity;

/// Command to register an account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Handler for registration.
pub struct RegisterUserHandler {
    accounts: Arc<dyn AccountRegistry>,
    tokens: Arc<dyn TokenIssuer>,
}

impl RegisterUserHandler {
    pub fn new(accounts: Arc<dyn AccountRegistry>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { accounts, tokens }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<IssuedIdentity, AuthError> {
        if cmd.display_name.trim().is_empty()
            || cmd.email.trim().is_empty()
            || !cmd.email.contains('@')
        {
            return Err(AuthError::InvalidCredentials);
        }
        if cmd.password.len() < 8 {
            return Err(AuthError::InvalidCredentials);
        }

        let account = self
            .accounts
            .create(NewAccount {
                display_name: cmd.display_name.trim().to_string(),
                email: cmd.email.trim().to_lowercase(),
                phone: cmd.phone,
                role: Role::Member,
                password_digest: PasswordDigest::create(&cmd.password).as_str().to_string(),
            })
            .await?;

        let user = account.to_authenticated();
        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = %user.id, "account registered");
        Ok(IssuedIdentity { user, token })
    }
}
