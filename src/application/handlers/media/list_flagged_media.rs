//! ListFlaggedMediaHandler - Query handler for the moderation queue.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::domain::media::{MediaError, MediaItem};
use crate::ports::MediaRepository;

/// Query for the flagged-media review queue.
#[derive(Debug, Clone)]
pub struct ListFlaggedMediaQuery {
    pub actor: AuthenticatedUser,
}

/// Handler for the moderation queue.
///
/// Returns flagged items oldest first so review is FIFO and no flagged
/// item is starved behind newer arrivals.
pub struct ListFlaggedMediaHandler {
    media: Arc<dyn MediaRepository>,
}

impl ListFlaggedMediaHandler {
    pub fn new(media: Arc<dyn MediaRepository>) -> Self {
        Self { media }
    }

    pub async fn handle(&self, query: ListFlaggedMediaQuery) -> Result<Vec<MediaItem>, MediaError> {
        if !query.actor.has_role(Role::Admin) {
            return Err(MediaError::forbidden("The review queue requires the admin role"));
        }

        Ok(self.media.list_flagged().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::media::test_support::MockMediaRepository;
    use crate::application::handlers::media::{ApproveMediaCommand, ApproveMediaHandler};
    use crate::domain::foundation::{AlbumId, UserId};
    use crate::domain::media::{MediaItem, MediaKind};

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "mod@example.com", "Mod", Role::Admin)
    }

    fn flagged_item() -> MediaItem {
        let mut item = MediaItem::upload(
            AlbumId::new(),
            UserId::new(),
            MediaKind::Image,
            "k",
            "/blobs/k",
            None,
            false,
        );
        item.record_report(UserId::new(), 1);
        item
    }

    #[tokio::test]
    async fn queue_is_admin_only() {
        let handler = ListFlaggedMediaHandler::new(Arc::new(MockMediaRepository::new()));

        let err = handler
            .handle(ListFlaggedMediaQuery {
                actor: AuthenticatedUser::new(UserId::new(), "m@example.com", "M", Role::Member),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn queue_is_oldest_first_and_shrinks_after_approval() {
        let oldest = flagged_item();
        let newer = flagged_item();
        let repo = Arc::new(MockMediaRepository::with_items(vec![
            oldest.clone(),
            newer.clone(),
        ]));
        let handler = ListFlaggedMediaHandler::new(repo.clone());

        let queue = handler
            .handle(ListFlaggedMediaQuery { actor: admin() })
            .await
            .unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].id, oldest.id);

        // Approve the head of the queue; the next-oldest moves up.
        ApproveMediaHandler::new(repo.clone())
            .handle(ApproveMediaCommand {
                actor: admin(),
                media_id: oldest.id,
            })
            .await
            .unwrap();

        let queue = handler
            .handle(ListFlaggedMediaQuery { actor: admin() })
            .await
            .unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, newer.id);
    }
}
