//! ListAlbumsHandler - Query handler for the visible-albums listing.

use std::sync::Arc;

use crate::domain::album::{Album, AlbumError};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{AlbumRepository, Page};

/// Query for the albums visible to a viewer.
#[derive(Debug, Clone)]
pub struct ListAlbumsQuery {
    pub actor: AuthenticatedUser,
    pub page: Page,
}

/// Handler for the album listing.
///
/// The repository applies the visibility rule and the newest-first
/// ordering; callers page through with offset/limit and may restart at any
/// point without re-deriving either.
pub struct ListAlbumsHandler {
    albums: Arc<dyn AlbumRepository>,
}

impl ListAlbumsHandler {
    pub fn new(albums: Arc<dyn AlbumRepository>) -> Self {
        Self { albums }
    }

    pub async fn handle(&self, query: ListAlbumsQuery) -> Result<Vec<Album>, AlbumError> {
        Ok(self.albums.list_visible(&query.actor, query.page).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::album::test_support::MockAlbumRepository;
    use crate::domain::album::AlbumVisibility;
    use crate::domain::foundation::{Role, UserId};

    fn actor(id: UserId, role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(id, "u@example.com", "U", role)
    }

    #[tokio::test]
    async fn listing_hides_private_albums_of_others() {
        let owner = UserId::new();
        let public =
            Album::create(owner, "Public", None, AlbumVisibility::Public, None).unwrap();
        let private =
            Album::create(owner, "Private", None, AlbumVisibility::Private, None).unwrap();
        let handler = ListAlbumsHandler::new(Arc::new(MockAlbumRepository::with_albums(vec![
            public.clone(),
            private.clone(),
        ])));

        let seen = handler
            .handle(ListAlbumsQuery {
                actor: actor(UserId::new(), Role::Member),
                page: Page::first(),
            })
            .await
            .unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, public.id);

        let owner_sees = handler
            .handle(ListAlbumsQuery {
                actor: actor(owner, Role::Member),
                page: Page::first(),
            })
            .await
            .unwrap();
        assert_eq!(owner_sees.len(), 2);
    }

    #[tokio::test]
    async fn paging_is_restartable() {
        let owner = UserId::new();
        let albums: Vec<Album> = (0..5)
            .map(|i| {
                Album::create(owner, format!("Album {}", i), None, AlbumVisibility::Public, None)
                    .unwrap()
            })
            .collect();
        let handler =
            ListAlbumsHandler::new(Arc::new(MockAlbumRepository::with_albums(albums)));
        let viewer = actor(UserId::new(), Role::Member);

        let first = handler
            .handle(ListAlbumsQuery {
                actor: viewer.clone(),
                page: Page::new(0, 2),
            })
            .await
            .unwrap();
        let second = handler
            .handle(ListAlbumsQuery {
                actor: viewer.clone(),
                page: Page::new(2, 2),
            })
            .await
            .unwrap();
        let first_again = handler
            .handle(ListAlbumsQuery {
                actor: viewer,
                page: Page::new(0, 2),
            })
            .await
            .unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(
            first.iter().map(|a| a.id).collect::<Vec<_>>(),
            first_again.iter().map(|a| a.id).collect::<Vec<_>>()
        );
        assert!(first.iter().all(|a| second.iter().all(|b| b.id != a.id)));
    }
}
