//! HTTP DTOs for the admin endpoints.

use serde::Serialize;

use crate::application::handlers::admin::DashboardSummary;

/// Aggregate dashboard figures, derived on demand.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub total_users: u64,
    pub total_albums: u64,
    pub total_media: u64,
    pub flagged_media: u64,
    pub uploads_last_day: u64,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_users: summary.total_users,
            total_albums: summary.total_albums,
            total_media: summary.total_media,
            flagged_media: summary.flagged_media,
            uploads_last_day: summary.uploads_last_day,
        }
    }
}
