//! Album aggregate entity.
//!
//! An album is created by a member, collects uploaded media, and becomes
//! read-only for uploads once its expiration timestamp passes. The
//! visibility rule lives here so callers never re-derive it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AlbumId, AuthenticatedUser, MediaId, Timestamp, UserId, ValidationError,
};

use super::AlbumVisibility;

/// An event album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// Unique identifier, immutable.
    pub id: AlbumId,

    /// Owning user (the event host).
    pub owner_id: UserId,

    /// Album title, non-empty.
    pub title: String,

    /// Optional theme tag (e.g. "garden", "vintage").
    pub theme: Option<String>,

    /// Who may see the album.
    pub visibility: AlbumVisibility,

    /// Optional cover media reference.
    pub cover_media: Option<MediaId>,

    /// Optional expiration; uploads are refused once this is in the past.
    pub expires_at: Option<Timestamp>,

    /// When the album was created.
    pub created_at: Timestamp,
}

/// Mutable fields accepted by an album update.
#[derive(Debug, Clone, Default)]
pub struct AlbumChanges {
    pub title: Option<String>,
    pub theme: Option<Option<String>>,
    pub visibility: Option<AlbumVisibility>,
    pub cover_media: Option<Option<MediaId>>,
    pub expires_at: Option<Option<Timestamp>>,
}

impl Album {
    /// Creates a new album.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `PastTimestamp` if `expires_at` is already in the past
    pub fn create(
        owner_id: UserId,
        title: impl Into<String>,
        theme: Option<String>,
        visibility: AlbumVisibility,
        expires_at: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if let Some(expiry) = &expires_at {
            if expiry.is_past() {
                return Err(ValidationError::past_timestamp("expires_at"));
            }
        }

        Ok(Self {
            id: AlbumId::new(),
            owner_id,
            title,
            theme,
            visibility,
            cover_media: None,
            expires_at,
            created_at: Timestamp::now(),
        })
    }

    /// True iff the album still accepts uploads: no expiration set, or the
    /// expiration is strictly in the future.
    pub fn is_accepting_uploads(&self) -> bool {
        match &self.expires_at {
            None => true,
            Some(expiry) => !expiry.is_past(),
        }
    }

    /// Central visibility rule: public albums are visible to everyone,
    /// private albums only to their owner and admins.
    pub fn visible_to(&self, viewer: &AuthenticatedUser) -> bool {
        match self.visibility {
            AlbumVisibility::Public => true,
            AlbumVisibility::Private => viewer.is_admin() || viewer.id == self.owner_id,
        }
    }

    /// True iff the caller may mutate this album (owner or admin).
    pub fn editable_by(&self, actor: &AuthenticatedUser) -> bool {
        actor.is_admin() || actor.id == self.owner_id
    }

    /// Applies an update, re-running creation-time validation on changed
    /// fields. Expiration may only be set to a future instant.
    pub fn apply(&mut self, changes: AlbumChanges) -> Result<(), ValidationError> {
        if let Some(title) = changes.title {
            if title.trim().is_empty() {
                return Err(ValidationError::empty_field("title"));
            }
            self.title = title;
        }
        if let Some(expires_at) = changes.expires_at {
            if let Some(expiry) = &expires_at {
                if expiry.is_past() {
                    return Err(ValidationError::past_timestamp("expires_at"));
                }
            }
            self.expires_at = expires_at;
        }
        if let Some(theme) = changes.theme {
            self.theme = theme;
        }
        if let Some(visibility) = changes.visibility {
            self.visibility = visibility;
        }
        if let Some(cover) = changes.cover_media {
            self.cover_media = cover;
        }
        Ok(())
    }
}
