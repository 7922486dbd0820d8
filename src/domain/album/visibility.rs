//! Album visibility levels.

use serde::{Deserialize, Serialize};

/// Who may see an album and its media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumVisibility {
    /// Listed for every authenticated user.
    Public,

    /// Listed only for the owner and admins.
    Private,
}

impl AlbumVisibility {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumVisibility::Public => "public",
            AlbumVisibility::Private => "private",
        }
    }

    /// Parses a visibility from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(AlbumVisibility::Public),
            "private" => Some(AlbumVisibility::Private),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlbumVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
