//! ApproveMediaHandler - Command handler for the admin approve decision.
//!
//! Concurrent moderation of one item serializes on the repository's
//! compare-and-swap: the losing call observes a terminal state on reload
//! and fails with `InvalidState` instead of overwriting.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MediaId, Role};
use crate::domain::media::{MediaError, MediaItem};
use crate::ports::MediaRepository;

use super::CAS_RETRIES;

/// Command to approve a media item.
#[derive(Debug, Clone)]
pub struct ApproveMediaCommand {
    pub actor: AuthenticatedUser,
    pub media_id: MediaId,
}

/// Handler for the approve decision.
pub struct ApproveMediaHandler {
    media: Arc<dyn MediaRepository>,
}

impl ApproveMediaHandler {
    pub fn new(media: Arc<dyn MediaRepository>) -> Self {
        Self { media }
    }

    pub async fn handle(&self, cmd: ApproveMediaCommand) -> Result<MediaItem, MediaError> {
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

            item.approve()?;

            match self.media.update(&item, loaded_version).await {
                Ok(()) => {
                    tracing::info!(media_id = %item.id, admin = %cmd.actor.id, "media approved");
                    return Ok(item);
                }
                // Lost the race. A benign report may have moved the version;
                // a terminal decision will surface as InvalidState on the
                // next iteration's approve().
                Err(e) if e.is_conflict() => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(MediaError::infrastructure(
            "approval could not be recorded under contention",
        ))
    }
}
