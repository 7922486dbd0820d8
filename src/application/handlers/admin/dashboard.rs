//! DashboardHandler - Query handler for admin aggregate stats.
//!
//! All figures are derived read-only aggregates computed on demand;
//! nothing here is stored.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, Role, Timestamp};
use crate::ports::{AccountRegistry, AlbumRepository, MediaRepository};

/// Query for the dashboard summary.
#[derive(Debug, Clone)]
pub struct DashboardQuery {
    pub actor: AuthenticatedUser,
}

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_users: u64,
    pub total_albums: u64,
    pub total_media: u64,
    pub flagged_media: u64,
    /// Uploads in the trailing 24 hours.
    pub uploads_last_day: u64,
}

/// Handler for the dashboard summary.
pub struct DashboardHandler {
    accounts: Arc<dyn AccountRegistry>,
    albums: Arc<dyn AlbumRepository>,
    media: Arc<dyn MediaRepository>,
}

impl DashboardHandler {
    pub fn new(
        accounts: Arc<dyn AccountRegistry>,
        albums: Arc<dyn AlbumRepository>,
        media: Arc<dyn MediaRepository>,
    ) -> Self {
        Self {
            accounts,
            albums,
            media,
        }
    }

    pub async fn handle(&self, query: DashboardQuery) -> Result<DashboardSummary, DomainError> {
        if !query.actor.has_role(Role::Admin) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "The dashboard requires the admin role",
            ));
        }

        let total_users = self
            .accounts
            .count()
            .await
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        let total_albums = self.albums.count().await?;
        let media_stats = self.media.statistics(Timestamp::now().minus_hours(24)).await?;

        Ok(DashboardSummary {
            total_users,
            total_albums,
            total_media: media_stats.total,
            flagged_media: media_stats.flagged,
            uploads_last_day: media_stats.uploaded_since_cutoff,
        })
    }
}
