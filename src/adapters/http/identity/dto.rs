//! HTTP DTOs for the identity endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::identity::IssuedIdentity;
use crate::domain::foundation::Role;

/// Request to register an account.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request to log in with credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying the issued bearer token and the caller it names.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// The authenticated caller as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<IssuedIdentity> for AuthResponse {
    fn from(issued: IssuedIdentity) -> Self {
        Self {
            token: issued.token,
            user: UserResponse {
                id: issued.user.id.to_string(),
                name: issued.user.display_name,
                email: issued.user.email,
                role: issued.user.role,
            },
        }
    }
}
