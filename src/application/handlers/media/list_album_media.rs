//! ListAlbumMediaHandler - Query handler for an album's media, filtered by
//! the requester's visibility.

use std::sync::Arc;

use crate::domain::foundation::{AlbumId, AuthenticatedUser};
use crate::domain::media::{MediaError, MediaItem};
use crate::ports::{AlbumRepository, MediaRepository};

/// Query for the media of one album.
#[derive(Debug, Clone)]
pub struct ListAlbumMediaQuery {
    pub actor: AuthenticatedUser,
    pub album_id: AlbumId,
}

/// Handler for the album media listing.
///
/// Approved and pending items are visible to every viewer; flagged items
/// only to admins and the uploader; rejected items only to admins. The
/// rule lives on the aggregate, this handler just applies it.
pub struct ListAlbumMediaHandler {
    albums: Arc<dyn AlbumRepository>,
    media: Arc<dyn MediaRepository>,
}

impl ListAlbumMediaHandler {
    pub fn new(albums: Arc<dyn AlbumRepository>, media: Arc<dyn MediaRepository>) -> Self {
        Self { albums, media }
    }

    pub async fn handle(&self, query: ListAlbumMediaQuery) -> Result<Vec<MediaItem>, MediaError> {
        let album = self
            .albums
            .find_by_id(&query.album_id)
            .await
            .map_err(|e| MediaError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                MediaError::validation("album_id", format!("album {} not found", query.album_id))
            })?;

        if !album.visible_to(&query.actor) {
            return Err(MediaError::forbidden("You may not view this album"));
        }

        let items = self.media.list_by_album(&query.album_id).await?;
        Ok(items
            .into_iter()
            .filter(|item| item.visible_to(&query.actor))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::album::test_support::MockAlbumRepository;
    use crate::application::handlers::media::test_support::MockMediaRepository;
    use crate::domain::album::{Album, AlbumVisibility};
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::media::{MediaKind, ModerationStatus};

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "u@example.com", "U", role)
    }

    fn item_in(album_id: AlbumId, uploader: UserId) -> MediaItem {
        MediaItem::upload(album_id, uploader, MediaKind::Image, "k", "/blobs/k", None, false)
    }

    #[tokio::test]
    async fn listing_applies_the_visibility_rule_per_state() {
        let owner = UserId::new();
        let uploader = UserId::new();
        let album = Album::create(owner, "Reception", None, AlbumVisibility::Public, None).unwrap();

        let pending = item_in(album.id, uploader);
        let mut approved = item_in(album.id, uploader);
        approved.approve().unwrap();
        let mut flagged = item_in(album.id, uploader);
        flagged.record_report(UserId::new(), 1);
        let mut rejected = item_in(album.id, uploader);
        rejected.record_report(UserId::new(), 1);
        rejected.reject().unwrap();

        let albums = Arc::new(MockAlbumRepository::with_albums(vec![album.clone()]));
        let media = Arc::new(MockMediaRepository::with_items(vec![
            pending.clone(),
            approved.clone(),
            flagged.clone(),
            rejected.clone(),
        ]));
        let handler = ListAlbumMediaHandler::new(albums, media);

        // A stranger sees pending + approved.
        let seen = handler
            .handle(ListAlbumMediaQuery {
                actor: user(Role::Member),
                album_id: album.id,
            })
            .await
            .unwrap();
        let ids: Vec<_> = seen.iter().map(|i| i.id).collect();
        assert!(ids.contains(&pending.id));
        assert!(ids.contains(&approved.id));
        assert!(!ids.contains(&flagged.id));
        assert!(!ids.contains(&rejected.id));

        // The uploader additionally sees their flagged item.
        let uploader_user = AuthenticatedUser::new(uploader, "up@example.com", "Up", Role::Member);
        let seen = handler
            .handle(ListAlbumMediaQuery {
                actor: uploader_user,
                album_id: album.id,
            })
            .await
            .unwrap();
        let ids: Vec<_> = seen.iter().map(|i| i.id).collect();
        assert!(ids.contains(&flagged.id));
        assert!(!ids.contains(&rejected.id));

        // Admins see everything, rejected included.
        let seen = handler
            .handle(ListAlbumMediaQuery {
                actor: user(Role::Admin),
                album_id: album.id,
            })
            .await
            .unwrap();
        assert_eq!(seen.len(), 4);
    }

    #[tokio::test]
    async fn listing_hidden_album_is_forbidden() {
        let album = Album::create(
            UserId::new(),
            "Rehearsal",
            None,
            AlbumVisibility::Private,
            None,
        )
        .unwrap();
        let handler = ListAlbumMediaHandler::new(
            Arc::new(MockAlbumRepository::with_albums(vec![album.clone()])),
            Arc::new(MockMediaRepository::new()),
        );

        let err = handler
            .handle(ListAlbumMediaQuery {
                actor: user(Role::Member),
                album_id: album.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn unknown_album_is_a_validation_error() {
        let handler = ListAlbumMediaHandler::new(
            Arc::new(MockAlbumRepository::new()),
            Arc::new(MockMediaRepository::new()),
        );

        let err = handler
            .handle(ListAlbumMediaQuery {
                actor: user(Role::Member),
                album_id: AlbumId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::ValidationFailed { .. }));
    }
}
