//! Album repository port.
//!
//! Albums are read-mostly with rare owner/admin writes, so no optimistic
//! versioning is required here; the moderation and order stores carry that
//! discipline instead.

use async_trait::async_trait;

use crate::domain::album::Album;
use crate::domain::foundation::{AlbumId, AuthenticatedUser, DomainError};

use super::Page;

/// Repository port for album persistence.
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// Persist a new album.
    async fn insert(&self, album: &Album) -> Result<(), DomainError>;

    /// Find an album by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, DomainError>;

    /// Persist changes to an existing album.
    ///
    /// # Errors
    ///
    /// - `AlbumNotFound` if the album does not exist
    async fn update(&self, album: &Album) -> Result<(), DomainError>;

    /// List albums visible to the viewer, newest first.
    ///
    /// Public albums plus private albums the viewer owns; admins see
    /// everything. Implementations apply [`Album::visible_to`] (or its SQL
    /// equivalent) so callers never re-derive the rule, and the ordering is
    /// stable across pages.
    async fn list_visible(
        &self,
        viewer: &AuthenticatedUser,
        page: Page,
    ) -> Result<Vec<Album>, DomainError>;

    /// Total albums, for the admin dashboard.
    async fn count(&self) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn album_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AlbumRepository) {}
    }
}
