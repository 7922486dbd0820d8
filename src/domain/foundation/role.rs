//! User roles and the capability queries derived from them.
//!
//! Role checks are centralized here and on [`AuthenticatedUser`]; business
//! logic never compares role strings inline.
//!
//! [`AuthenticatedUser`]: super::AuthenticatedUser

use serde::{Deserialize, Serialize};

/// Platform role attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Limited contributor: may view, upload and report, but not create albums.
    Guest,

    /// Full account: everything a guest can do, plus album creation and
    /// plan purchases.
    Member,

    /// Moderator/operator: full visibility, moderation decisions, dashboard.
    Admin,
}

impl Role {
    /// Returns true if this role may create albums.
    pub fn can_create_albums(&self) -> bool {
        matches!(self, Role::Member | Role::Admin)
    }

    /// Returns true if this role carries moderation privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Parses a role from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "guest" => Some(Role::Guest),
            "member" => Some(Role::Member),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Returns the wire representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Member => "member",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
