//! RejectMediaHandler - Command handler for the admin reject decision.
//!
//! Rejection never deletes: the record and its storage key are retained
//! with terminal state `Rejected`, and the visibility rule denies
//! retrieval to non-admins from then on.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MediaId, Role};
use crate::domain::media::{MediaError, MediaItem};
use crate::ports::MediaRepository;

use super::CAS_RETRIES;

/// Command to reject a media item.
#[derive(Debug, Clone)]
pub struct RejectMediaCommand {
    pub actor: AuthenticatedUser,
    pub media_id: MediaId,
}

/// Handler for the reject decision.
pub struct RejectMediaHandler {
    media: Arc<dyn MediaRepository>,
}

impl RejectMediaHandler {
    pub fn new(media: Arc<dyn MediaRepository>) -> Self {
        Self { media }
    }

    pub async fn handle(&self, cmd: RejectMediaCommand) -> Result<MediaItem, MediaError> {
        if !cmd.actor.has_role(Role::Admin) {
            return Err(MediaError::forbidden("Moderation requires the admin role"));
        }

        for _ in 0..CAS_RETRIES {
            let mut item = self
                .media
                .find_by_id(&cmd.media_id)
                .await?
                .ok_or(MediaError::NotFound(cmd.media_id))?;
            let loaded_version = item.version;

            item.reject()?;

            match self.media.update(&item, loaded_version).await {
                Ok(()) => {
                    tracing::info!(media_id = %item.id, admin = %cmd.actor.id, "media rejected");
                    return Ok(item);
                }
                Err(e) if e.is_conflict() => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(MediaError::infrastructure(
            "rejection could not be recorded under contention",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::media::test_support::MockMediaRepository;
    use crate::application::handlers::media::{ApproveMediaCommand, ApproveMediaHandler};
    use crate::domain::foundation::{AlbumId, UserId};
    use crate::domain::media::{MediaKind, ModerationStatus};

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

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "mod@example.com", "Mod", Role::Admin)
    }

    #[tokio::test]
    async fn admin_rejects_flagged_item_and_record_is_retained() {
        let item = flagged_item();
        let repo = Arc::new(MockMediaRepository::with_items(vec![item.clone()]));
        let handler = RejectMediaHandler::new(repo.clone());

        let rejected = handler
            .handle(RejectMediaCommand {
                actor: admin(),
                media_id: item.id,
            })
            .await
            .unwrap();

        assert_eq!(rejected.status, ModerationStatus::Rejected);
        // Not deleted: the record and storage key survive for audit.
        let stored = repo.get(&item.id).unwrap();
        assert_eq!(stored.status, ModerationStatus::Rejected);
        assert_eq!(stored.storage_key, "k");
    }

    #[tokio::test]
    async fn admin_rejects_pending_item_without_a_report() {
        let item = MediaItem::upload(
            AlbumId::new(),
            UserId::new(),
            MediaKind::Image,
            "k",
            "/blobs/k",
            None,
            false,
        );
        let repo = Arc::new(MockMediaRepository::with_items(vec![item.clone()]));
        let handler = RejectMediaHandler::new(repo.clone());

        let rejected = handler
            .handle(RejectMediaCommand {
                actor: admin(),
                media_id: item.id,
            })
            .await
            .unwrap();

        assert_eq!(rejected.status, ModerationStatus::Rejected);
        assert_eq!(repo.get(&item.id).unwrap().status, ModerationStatus::Rejected);
    }

    #[tokio::test]
    async fn guest_cannot_reject() {
        let item = flagged_item();
        let handler =
            RejectMediaHandler::new(Arc::new(MockMediaRepository::with_items(vec![item.clone()])));

        let err = handler
            .handle(RejectMediaCommand {
                actor: AuthenticatedUser::new(
                    UserId::new(),
                    "g@example.com",
                    "G",
                    crate::domain::foundation::Role::Guest,
                ),
                media_id: item.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn reject_then_approve_fails_with_invalid_state() {
        let item = flagged_item();
        let repo = Arc::new(MockMediaRepository::with_items(vec![item.clone()]));

        RejectMediaHandler::new(repo.clone())
            .handle(RejectMediaCommand {
                actor: admin(),
                media_id: item.id,
            })
            .await
            .unwrap();

        let err = ApproveMediaHandler::new(repo.clone())
            .handle(ApproveMediaCommand {
                actor: admin(),
                media_id: item.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::InvalidState { .. }));
        assert_eq!(repo.get(&item.id).unwrap().status, ModerationStatus::Rejected);
    }
}
