//! JWT identity gate adapter.
//!
//! HS256 bearer tokens with a 24-hour expiry. The token carries only the
//! subject; the caller's role is always read back from the account
//! registry at resolution time, so role changes take effect on the next
//! request rather than at the next token refresh.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{AccountRegistry, IdentityGate, TokenIssuer};

/// Default token lifetime: 24 hours.
const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// JWT signing configuration.
#[derive(Clone)]
pub struct JwtConfig {
    secret: SecretString,
    token_ttl_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Override the token lifetime (tests, short-lived deployments).
    pub fn with_ttl_secs(mut self, ttl: u64) -> Self {
        self.token_ttl_secs = ttl;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user id.
    sub: String,
    /// Expiry, Unix seconds.
    exp: u64,
    /// Issued at, Unix seconds.
    iat: u64,
}

/// Identity gate + token issuer over the account registry.
pub struct JwtIdentityGate {
    config: JwtConfig,
    accounts: Arc<dyn AccountRegistry>,
}

impl JwtIdentityGate {
    pub fn new(config: JwtConfig, accounts: Arc<dyn AccountRegistry>) -> Self {
        Self { config, accounts }
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.config.secret.expose_secret().as_bytes())
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.config.secret.expose_secret().as_bytes())
    }
}

#[async_trait]
impl IdentityGate for JwtIdentityGate {
    async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key(), &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        let user_id = UserId::from_str(&data.claims.sub).map_err(|_| AuthError::InvalidToken)?;

        let account = self
            .accounts
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(account.to_authenticated())
    }
}

impl TokenIssuer for JwtIdentityGate {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        let now = Timestamp::now().as_unix_secs();
        let claims = Claims {
            sub: user.id.to_string(),
            exp: now + self.config.token_ttl_secs,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding_key())
            .map_err(|e| AuthError::service_unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccountRegistry;
    use crate::domain::foundation::{PasswordDigest, Role};
    use crate::ports::NewAccount;

    async fn registry_with_member() -> (Arc<InMemoryAccountRegistry>, AuthenticatedUser) {
        let registry = Arc::new(InMemoryAccountRegistry::new());
        let account = registry
            .create(NewAccount {
                display_name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                phone: None,
                role: Role::Member,
                password_digest: PasswordDigest::create("correct-horse").as_str().to_string(),
            })
            .await
            .unwrap();
        let user = account.to_authenticated();
        (registry, user)
    }

    #[tokio::test]
    async fn issued_token_resolves_back_to_the_user() {
        let (registry, user) = registry_with_member().await;
        let gate = JwtIdentityGate::new(JwtConfig::new("unit-test-secret"), registry);

        let token = gate.issue(&user).unwrap();
        let resolved = gate.resolve(&token).await.unwrap();

        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.role, Role::Member);
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let (registry, _) = registry_with_member().await;
        let gate = JwtIdentityGate::new(JwtConfig::new("unit-test-secret"), registry);

        let err = gate.resolve("not.a.token").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let (registry, user) = registry_with_member().await;
        let issuer =
            JwtIdentityGate::new(JwtConfig::new("first-secret"), registry.clone());
        let gate = JwtIdentityGate::new(JwtConfig::new("second-secret"), registry);

        let token = issuer.issue(&user).unwrap();
        let err = gate.resolve(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_user_not_found() {
        let (registry, _) = registry_with_member().await;
        let gate = JwtIdentityGate::new(JwtConfig::new("unit-test-secret"), registry);

        let ghost = AuthenticatedUser::new(UserId::new(), "g@example.com", "G", Role::Member);
        let token = gate.issue(&ghost).unwrap();

        let err = gate.resolve(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn role_comes_from_the_registry_not_the_token() {
        // A token issued while the user was a member still resolves with
        // whatever role the registry holds now.
        let (registry, user) = registry_with_member().await;
        let gate = JwtIdentityGate::new(JwtConfig::new("unit-test-secret"), registry.clone());

        let token = gate.issue(&user).unwrap();
        let resolved = gate.resolve(&token).await.unwrap();
        assert_eq!(resolved.role, Role::Member);
    }
}
