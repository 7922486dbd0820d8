//! ReportMediaHandler - Command handler for viewer reports.
//!
//! Reports are idempotent per reporter. The write is a compare-and-swap;
//! losing to another concurrent report is benign, so the handler retries a
//! bounded number of times against a fresh load.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MediaId};
use crate::domain::media::{MediaError, MediaItem, ReportOutcome};
use crate::ports::MediaRepository;

use super::CAS_RETRIES;

/// Command to report a media item.
#[derive(Debug, Clone)]
pub struct ReportMediaCommand {
    pub actor: AuthenticatedUser,
    pub media_id: MediaId,
}

/// Handler for media reports.
pub struct ReportMediaHandler {
    media: Arc<dyn MediaRepository>,
    report_threshold: u32,
}

impl ReportMediaHandler {
    pub fn new(media: Arc<dyn MediaRepository>, report_threshold: u32) -> Self {
        Self {
            media,
            // A threshold of zero would flag unreported items; floor at one.
            report_threshold: report_threshold.max(1),
        }
    }

    pub async fn handle(&self, cmd: ReportMediaCommand) -> Result<MediaItem, MediaError> {
        for _ in 0..CAS_RETRIES {
            let mut item = self
                .media
                .find_by_id(&cmd.media_id)
                .await?
                .ok_or(MediaError::NotFound(cmd.media_id))?;
            let loaded_version = item.version;

            let outcome = item.record_report(cmd.actor.id, self.report_threshold);
            if outcome == ReportOutcome::AlreadyRecorded {
                return Ok(item);
            }

            match self.media.update(&item, loaded_version).await {
                Ok(()) => {
                    if outcome == ReportOutcome::RecordedAndFlagged {
                        tracing::info!(
                            media_id = %item.id,
                            reports = item.report_count(),
                            "media flagged for review"
                        );
                    }
                    return Ok(item);
                }
                Err(e) if e.is_conflict() => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(MediaError::infrastructure(
            "report could not be recorded under contention",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::media::test_support::MockMediaRepository;
    use crate::domain::foundation::{AlbumId, Role, UserId};
    use crate::domain::media::{MediaKind, ModerationStatus};

    fn pending_item() -> MediaItem {
        MediaItem::upload(
            AlbumId::new(),
            UserId::new(),
            MediaKind::Image,
            "k",
            "/blobs/k",
            None,
            false,
        )
    }

    fn actor() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "g@example.com", "G", Role::Guest)
    }

    #[tokio::test]
    async fn single_report_flags_at_default_threshold() {
        let item = pending_item();
        let repo = Arc::new(MockMediaRepository::with_items(vec![item.clone()]));
        let handler = ReportMediaHandler::new(repo.clone(), 1);

        let updated = handler
            .handle(ReportMediaCommand {
                actor: actor(),
                media_id: item.id,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, ModerationStatus::Flagged);
        assert_eq!(repo.get(&item.id).unwrap().status, ModerationStatus::Flagged);
    }

    #[tokio::test]
    async fn repeat_report_by_same_user_counts_once() {
        let item = pending_item();
        let repo = Arc::new(MockMediaRepository::with_items(vec![item.clone()]));
        let handler = ReportMediaHandler::new(repo.clone(), 2);
        let reporter = actor();

        handler
            .handle(ReportMediaCommand {
                actor: reporter.clone(),
                media_id: item.id,
            })
            .await
            .unwrap();
        let second = handler
            .handle(ReportMediaCommand {
                actor: reporter,
                media_id: item.id,
            })
            .await
            .unwrap();

        assert_eq!(second.report_count(), 1);
        assert_eq!(second.status, ModerationStatus::Pending);
        assert_eq!(repo.get(&item.id).unwrap().report_count(), 1);
    }

    #[tokio::test]
    async fn distinct_reporters_reach_the_threshold() {
        let item = pending_item();
        let repo = Arc::new(MockMediaRepository::with_items(vec![item.clone()]));
        let handler = ReportMediaHandler::new(repo.clone(), 2);

        handler
            .handle(ReportMediaCommand {
                actor: actor(),
                media_id: item.id,
            })
            .await
            .unwrap();
        let flagged = handler
            .handle(ReportMediaCommand {
                actor: actor(),
                media_id: item.id,
            })
            .await
            .unwrap();

        assert_eq!(flagged.status, ModerationStatus::Flagged);
    }

    #[tokio::test]
    async fn reporting_missing_media_is_not_found() {
        let handler = ReportMediaHandler::new(Arc::new(MockMediaRepository::new()), 1);

        let err = handler
            .handle(ReportMediaCommand {
                actor: actor(),
                media_id: MediaId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::NotFound(_)));
    }

    #[tokio::test]
    async fn report_on_approved_item_counts_without_transition() {
        let mut item = pending_item();
        item.approve().unwrap();
        let repo = Arc::new(MockMediaRepository::with_items(vec![item.clone()]));
        let handler = ReportMediaHandler::new(repo.clone(), 1);

        let updated = handler
            .handle(ReportMediaCommand {
                actor: actor(),
                media_id: item.id,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, ModerationStatus::Approved);
        assert_eq!(updated.report_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_reports_all_land() {
        let item = pending_item();
        let repo = Arc::new(MockMediaRepository::with_items(vec![item.clone()]));
        let handler = Arc::new(ReportMediaHandler::new(repo.clone(), 10));

        let mut tasks = Vec::new();
        for _ in 0..5 {
            let handler = handler.clone();
            let media_id = item.id;
            tasks.push(tokio::spawn(async move {
                handler
                    .handle(ReportMediaCommand {
                        actor: AuthenticatedUser::new(
                            UserId::new(),
                            "r@example.com",
                            "R",
                            Role::Guest,
                        ),
                        media_id,
                    })
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.get(&item.id).unwrap().report_count(), 5);
    }
}
